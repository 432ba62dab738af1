use std::path::Path;

use shipyard_core::MirrorTool;
use shipyard_exec::Invocation;

use crate::exclusions::ExclusionSet;
use crate::matcher::unquote;

/// Mirror-copy command for `source_root` → `dest`, run from `source_root`.
///
/// Argument values are unquoted because the runner passes them as discrete
/// argv entries; [`Invocation::command_line`] shows them quoted again.
pub fn mirror_invocation(
    tool: MirrorTool,
    source_root: &Path,
    dest: &Path,
    exclusions: &ExclusionSet,
) -> Invocation {
    match tool {
        MirrorTool::Robocopy => robocopy(source_root, dest, exclusions),
        MirrorTool::Rsync => rsync(source_root, dest, exclusions),
    }
}

fn robocopy(source_root: &Path, dest: &Path, exclusions: &ExclusionSet) -> Invocation {
    let mut invocation = Invocation::new("robocopy", source_root)
        .arg(".")
        .arg(dest.display().to_string())
        .args(["/s", "/purge", "/nfl", "/ndl"]);

    if !exclusions.files.is_empty() {
        invocation = invocation
            .arg("/xf")
            .args(exclusions.files.iter().map(|f| unquote(f)));
    }
    if !exclusions.directories.is_empty() {
        invocation = invocation
            .arg("/xd")
            .args(exclusions.directories.iter().map(|d| unquote(d)));
    }

    invocation
}

fn rsync(source_root: &Path, dest: &Path, exclusions: &ExclusionSet) -> Invocation {
    let mut invocation = Invocation::new("rsync", source_root)
        .args(["-a", "--delete", "./"])
        .arg(with_trailing_slash(dest));

    for name in &exclusions.files {
        invocation = invocation.arg(format!("--exclude={}", unquote(name)));
    }
    for dir in exclusions.matched_directories() {
        let dir = unquote(dir);
        match anchored(dir, source_root).or_else(|| anchored(dir, dest)) {
            Some(pattern) => invocation = invocation.arg(format!("--exclude={pattern}")),
            None => tracing::warn!(dir, "matched directory is outside both copy roots, not excluded"),
        }
    }

    invocation
}

/// `dir` relative to `root` as an rsync pattern: a leading `/` anchors it at
/// the transfer root and a trailing `/` restricts it to directories.
/// Compared by path components, so `.` segments and trailing separators
/// on either side do not matter.
fn anchored(dir: &str, root: &Path) -> Option<String> {
    let mut rest = Path::new(dir).components();
    for part in root.components() {
        if rest.next() != Some(part) {
            return None;
        }
    }

    let relative: Vec<_> = rest.map(|c| c.as_os_str().to_string_lossy()).collect();
    if relative.is_empty() {
        return None;
    }
    Some(format!("/{}/", relative.join("/")))
}

fn with_trailing_slash(path: &Path) -> String {
    let mut s = path.display().to_string();
    if !s.ends_with(std::path::is_separator) {
        s.push('/');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExclusionSet {
        ExclusionSet {
            files: vec!["*.log".to_owned(), "\"My Notes.txt\"".to_owned()],
            directories: vec![
                "*.log".to_owned(),
                "\"My Notes.txt\"".to_owned(),
                "/srv/src/temp/cache".to_owned(),
                "\"/srv/www/My Uploads\"".to_owned(),
            ],
        }
    }

    #[test]
    fn robocopy_lists_file_and_dir_exclusions() {
        let inv = mirror_invocation(
            MirrorTool::Robocopy,
            Path::new("/srv/src"),
            Path::new("/srv/www"),
            &sample(),
        );

        assert_eq!(inv.program, "robocopy");
        assert_eq!(inv.working_dir, Path::new("/srv/src"));
        assert_eq!(
            inv.args,
            [
                ".",
                "/srv/www",
                "/s",
                "/purge",
                "/nfl",
                "/ndl",
                "/xf",
                "*.log",
                "My Notes.txt",
                "/xd",
                "*.log",
                "My Notes.txt",
                "/srv/src/temp/cache",
                "/srv/www/My Uploads",
            ]
        );
        assert!(inv.command_line().ends_with(
            "/xd *.log \"My Notes.txt\" /srv/src/temp/cache \"/srv/www/My Uploads\""
        ));
    }

    #[test]
    fn robocopy_without_exclusions_has_no_switches() {
        let inv = mirror_invocation(
            MirrorTool::Robocopy,
            Path::new("/srv/src"),
            Path::new("/srv/www"),
            &ExclusionSet::default(),
        );

        assert_eq!(inv.args, [".", "/srv/www", "/s", "/purge", "/nfl", "/ndl"]);
    }

    #[cfg(unix)]
    #[test]
    fn rsync_anchors_matched_directories_to_their_root() {
        let inv = mirror_invocation(
            MirrorTool::Rsync,
            Path::new("/srv/src"),
            Path::new("/srv/www"),
            &sample(),
        );

        assert_eq!(inv.program, "rsync");
        assert_eq!(
            inv.args,
            [
                "-a",
                "--delete",
                "./",
                "/srv/www/",
                "--exclude=*.log",
                "--exclude=My Notes.txt",
                "--exclude=/temp/cache/",
                "--exclude=/My Uploads/",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn rsync_anchors_against_roots_with_dot_segments() {
        let set = ExclusionSet {
            files: Vec::new(),
            directories: vec!["/srv/src/Web/obj".to_owned()],
        };

        let inv = mirror_invocation(
            MirrorTool::Rsync,
            Path::new("/srv/src/./Web/"),
            Path::new("/srv/www"),
            &set,
        );

        assert_eq!(inv.args, ["-a", "--delete", "./", "/srv/www/", "--exclude=/obj/"]);
    }

    #[cfg(unix)]
    #[test]
    fn rsync_never_emits_absolute_patterns() {
        let set = ExclusionSet {
            files: Vec::new(),
            directories: vec!["/elsewhere/obj".to_owned(), "/srv/src".to_owned()],
        };

        let inv = mirror_invocation(
            MirrorTool::Rsync,
            Path::new("/srv/src"),
            Path::new("/srv/www"),
            &set,
        );

        assert_eq!(inv.args, ["-a", "--delete", "./", "/srv/www/"]);
    }
}
