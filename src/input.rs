pub enum Source {
    Interactive,
    File(String),
}

pub struct Input {
    pub source: Source,
    pub content: String,
}

impl Input {
    pub fn name(&self) -> &str {
        match &self.source {
            Source::Interactive => "<interactive input>",
            Source::File(filename) => filename,
        }
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.content.lines().nth(line.checked_sub(1)?)
    }
}
