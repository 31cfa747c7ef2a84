use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Usage: {program} <input KML file> <output KML file> <min distance>")]
    Usage { program: String },
    #[error("failed accessing `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TrackError {
    pub(crate) fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| TrackError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, TrackError>;
