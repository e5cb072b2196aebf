use std::path::{Component, Path, PathBuf};

use super::{Parser, ValueError};

/// Absolute path parser, registered as `absFile`.
///
/// Relative input is joined onto the current directory, and empty input
/// yields the current directory itself. The result is cleaned lexically:
/// `.` components are dropped and `..` removes the preceding component. The filesystem is not consulted, so the path
/// does not need to exist and symlinks are not resolved.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbsFile;

impl Parser for AbsFile {
    type Output = PathBuf;
    type Error = ValueError;

    fn name(&self) -> &'static str {
        "absFile"
    }

    fn parse(&self, raw: &str) -> Result<PathBuf, ValueError> {
        let path = Path::new(raw);
        let absolute = if raw.is_empty() {
            std::env::current_dir()
        } else {
            std::path::absolute(path)
        }
        .map_err(|source| ValueError::AbsolutePath {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(clean(&absolute))
    }
}

/// Lexically normalizes an absolute path.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `pop` is a no-op at the root, so `/..` stays `/`.
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }

    out
}
