use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use walkdir::WalkDir;

use crate::{Error, Result};

/// Contents of a one-value sysfs or procfs file, without surrounding
/// whitespace.
pub(crate) fn read_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    std::fs::read_to_string(path)
        .map(|raw| raw.trim().to_owned())
        .map_err(|e| Error::unreadable(e, path))
}

pub(crate) fn read_u64(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    parse(&read_string(path)?, path)
}

pub(crate) fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();

    std::fs::read(path).map_err(|e| Error::unreadable(e, path))
}

fn parse<T>(text: &str, path: &Path) -> Result<T>
where
    T: FromStr,
    T::Err: Into<crate::error::ErrorSource>,
{
    text.trim()
        .parse()
        .map_err(|e: T::Err| Error::unparseable(e, path))
}

/// Feed `path` to `matcher` one line at a time and return the first value it
/// produces. Files without a match are `PropertyAbsent`.
pub(crate) fn find_line<T>(
    path: &Path,
    mut matcher: impl FnMut(&str) -> Option<Result<T>>,
) -> Result<T> {
    let file = File::open(path).map_err(|e| Error::unreadable(e, path))?;

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::unreadable(e, path))?;

        if let Some(found) = matcher(&line) {
            return found;
        }
    }

    Err(Error::absent(format!("no match in {}", path.display())))
}

/// Ids named by a kernel cpu list file such as `online`.
pub(crate) fn read_list(path: impl AsRef<Path>) -> Result<Vec<usize>> {
    let path = path.as_ref();
    parse_list(&read_string(path)?, path)
}

/// Expand a kernel cpu list such as `0-3,8,10-11`. Ranges with more than one
/// dash are ignored.
fn parse_list(raw: &str, path: &Path) -> Result<Vec<usize>> {
    let mut ret = Vec::new();

    for range in raw.trim().split(',').filter(|range| !range.is_empty()) {
        match range.split_once('-') {
            None => ret.push(parse(range, path)?),
            Some((_, stop)) if stop.contains('-') => {
                debug!("ignoring cpu range {range:?} in {}", path.display());
            }
            Some((start, stop)) => {
                let start: usize = parse(start, path)?;
                let stop: usize = parse(stop, path)?;
                ret.extend(start..=stop);
            }
        }
    }

    Ok(ret)
}

/// Names of the entries directly below `dir`, sorted, leaving out dot files.
/// A missing directory lists as empty.
pub(crate) fn list_dir(dir: impl AsRef<Path>) -> Vec<String> {
    WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .filter(|name| !name.starts_with('.'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn list(raw: &str) -> Result<Vec<usize>> {
        parse_list(raw, "/sys/devices/system/cpu/online".as_ref())
    }

    #[test]
    fn cpu_lists() {
        assert_eq!(list("0-1\r\n").unwrap(), vec![0, 1]);
        assert_eq!(list("0-3,8,10-11\n").unwrap(), vec![0, 1, 2, 3, 8, 10, 11]);
        assert_eq!(list("5").unwrap(), vec![5]);
        assert!(list("\n").unwrap().is_empty());
    }

    #[test]
    fn malformed_cpu_lists() {
        assert_eq!(list("0-2-4,7").unwrap(), vec![7]);
        assert_eq!(list("0-x").unwrap_err().kind(), ErrorKind::Unparseable);
    }

    #[test]
    fn first_matching_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status");
        std::fs::write(&path, "Name:\tbash\nPid:\t42\nPPid:\t1\n").unwrap();

        let pid = find_line(&path, |line| {
            line.strip_prefix("Pid:")
                .map(|value| parse::<u64>(value, &path))
        });
        assert_eq!(pid.unwrap(), 42);

        let missing = find_line(&path, |line| {
            line.strip_prefix("Uid:").map(|_| Ok(()))
        });
        assert_eq!(missing.unwrap_err().kind(), ErrorKind::PropertyAbsent);
    }

    #[test]
    fn hidden_entries_are_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sda")).unwrap();
        std::fs::create_dir(dir.path().join(".cache")).unwrap();

        assert_eq!(list_dir(dir.path()), vec!["sda".to_string()]);
        assert!(list_dir(dir.path().join("missing")).is_empty());
    }
}
