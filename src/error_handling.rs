use std::fmt::Display;
use std::path::{Path, PathBuf};

pub trait ErrorType: Display + PartialEq {}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    // A location covering a whole file rather than one line of it
    pub fn whole(file: &Path) -> Self {
        Location {
            file: file.to_path_buf(),
            line: 0
        }
    }

    pub fn at(file: &Path, line: usize) -> Self {
        Location {
            file: file.to_path_buf(),
            line
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn new(location: Location, error: T) -> Self {
        Error { location, error }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Oops;

    impl ErrorType for Oops {}

    impl Display for Oops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "oops")
        }
    }

    #[test]
    fn location_display() {
        assert_eq!(Location::whole(Path::new("g.txt")).to_string(), "g.txt");
        assert_eq!(Location::at(Path::new("g.txt"), 4).to_string(), "g.txt:4");
    }

    #[test]
    fn error_display_contains_location_and_message() {
        let error = Error::new(Location::at(Path::new("g.txt"), 2), Oops);
        let shown = error.to_string();
        assert!(shown.contains("[g.txt:2]"));
        assert!(shown.contains("oops"));
    }
}
