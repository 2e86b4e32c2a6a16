use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    rc::Rc,
};

/// `Source` represents some literal source code.
/// Whether a file on disk or a one-off string passed on the command line,
/// it's essentially a string with a path, the path serving as the
/// source's name for error reporting. Sources without a real path point
/// to `./source`.
#[derive(Debug, PartialEq, Eq)]
pub struct Source {
    pub contents: String,
    pub path: PathBuf,
}

impl Source {
    /// Build a `Source` from an `&str` and a `Path`.
    pub fn new(contents: &str, path: &Path) -> Rc<Source> {
        Rc::new(Source {
            contents: contents.to_string(),
            path: path.to_owned(),
        })
    }

    /// Build a `Source` by reading a file from disk.
    pub fn path(path: &Path) -> std::io::Result<Rc<Source>> {
        let mut contents = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;

        Ok(Source::new(&contents, path))
    }

    /// Build a `Source` from a bare string, with no backing file.
    pub fn source(contents: &str) -> Rc<Source> {
        Source::new(contents, &PathBuf::from("./source"))
    }
}
