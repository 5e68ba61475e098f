use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// `prepend_path("PATH", "/dir")`, optionally with extra arguments.
const LUA_PREPEND: &str = r#"prepend_path\(\s*["']PATH["']\s*,\s*["']([^"']+)["']"#;

/// `prepend-path PATH /dir`, `prepend-path --delim : PATH {/dir}`.
const TCL_PREPEND: &str = r#"^\s*prepend-path\s+(?:-{1,2}\S+\s+(?:\S+\s+)?)*PATH\s+(?:\{([^}]+)\}|"([^"]+)"|(\S+))"#;

fn lua_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LUA_PREPEND).expect("valid lua prepend pattern"))
}

fn tcl_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TCL_PREPEND).expect("valid tcl prepend pattern"))
}

/// Extracts every PATH-prepend directory from module query output.
///
/// Lines that are not PATH prepends (other variables, warnings, banners)
/// are ignored. Directories come back in output order.
pub fn parse_path_prepends(output: &str) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    for line in output.lines() {
        if let Some(caps) = lua_regex().captures(line) {
            dirs.push(PathBuf::from(&caps[1]));
            continue;
        }

        if let Some(caps) = tcl_regex().captures(line) {
            if let Some(m) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) {
                dirs.push(PathBuf::from(m.as_str()));
            }
        }
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lua_show_output() {
        let output = r#"----------------------------------------------
   /opt/sw/modules/all/Foo/1.0.lua:
----------------------------------------------
help([[Foo does things]])
whatis("Description: Foo does things")
conflict("Foo")
prepend_path("CPATH","/opt/sw/Foo/1.0/include")
prepend_path("PATH","/opt/sw/Foo/1.0/bin")
prepend_path("LD_LIBRARY_PATH","/opt/sw/Foo/1.0/lib")
prepend_path("PATH","/opt/sw/Foo/1.0/sbin")
setenv("EBROOTFOO","/opt/sw/Foo/1.0")
"#;

        assert_eq!(
            parse_path_prepends(output),
            vec![
                PathBuf::from("/opt/sw/Foo/1.0/bin"),
                PathBuf::from("/opt/sw/Foo/1.0/sbin"),
            ]
        );
    }

    #[test]
    fn test_lua_whitespace_quotes_and_priority() {
        let output = "prepend_path( 'PATH' , '/a/bin' )\nprepend_path(\"PATH\", \"/b/bin\", \":\")\n";
        assert_eq!(
            parse_path_prepends(output),
            vec![PathBuf::from("/a/bin"), PathBuf::from("/b/bin")]
        );
    }

    #[test]
    fn test_tcl_forms() {
        let output = "module-whatis {Foo}\n\
                      prepend-path PATH /opt/sw/Foo/1.0/bin\n\
                      prepend-path\tPATH {/opt/sw/Foo/1.0/sbin}\n\
                      prepend-path --delim : PATH \"/opt/sw/Foo/1.0/libexec\"\n\
                      prepend-path MANPATH /opt/sw/Foo/1.0/share/man\n";

        assert_eq!(
            parse_path_prepends(output),
            vec![
                PathBuf::from("/opt/sw/Foo/1.0/bin"),
                PathBuf::from("/opt/sw/Foo/1.0/sbin"),
                PathBuf::from("/opt/sw/Foo/1.0/libexec"),
            ]
        );
    }

    #[test]
    fn test_other_variables_and_noise_ignored() {
        let output = "Lmod Warning: something odd\n\
                      prepend_path(\"MANPATH\",\"/x/share/man\")\n\
                      append_path(\"PATH\",\"/x/late/bin\")\n\
                      prepend_path(\"PYTHONPATH\",\"/x/lib/python\")\n\
                      setenv(\"PATH\",\"/x\")\n";

        assert!(parse_path_prepends(output).is_empty());
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_path_prepends("").is_empty());
    }
}
