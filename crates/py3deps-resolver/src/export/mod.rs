//! debhelper-style export of resolved relations
//!
//! `Substvars` is the MetadataSink used by the command line tool: relation
//! values are collected per package and variable and rendered as
//! `name=v1, v2` lines, maintenance scripts as `dir args` lines. Lines of
//! an existing substvars file that are not `python3:*` variables are kept
//! as they were.

use indexmap::IndexMap;

use crate::relations::{MaintenanceScript, MetadataSink, OrderedSet};

/// Substitution variables and rtupdate registrations for one or more packages
#[derive(Debug, Clone, Default)]
pub struct Substvars {
    packages: IndexMap<String, PackageSubstvars>,
}

/// Variables owned by py3deps; any other substvars line is passed through
const MANAGED_PREFIX: &str = "python3:";

#[derive(Debug, Clone, Default)]
struct PackageSubstvars {
    /// File layout: verbatim lines and managed variables in first-seen order
    lines: Vec<Line>,
    /// Variable name -> values in first-insertion order
    vars: IndexMap<String, OrderedSet<String>>,
    rtupdates: OrderedSet<MaintenanceScript>,
}

#[derive(Debug, Clone)]
enum Line {
    Verbatim(String),
    Variable(String),
}

impl Substvars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the current content of a package's substvars file
    ///
    /// Existing `python3:*` values are kept ahead of anything exported
    /// later. Every other line is written back byte for byte.
    pub fn merge_existing(&mut self, package: &str, content: &str) {
        for line in content.lines() {
            match line.split_once('=') {
                Some((name, values)) if name.trim().starts_with(MANAGED_PREFIX) => {
                    let name = name.trim();
                    for value in values.split(',').map(str::trim) {
                        self.add_substvar(package, name, value);
                    }
                },
                _ => self.package_mut(package).lines.push(Line::Verbatim(line.to_string())),
            }
        }
    }

    /// Values registered under a variable
    pub fn get(&self, package: &str, name: &str) -> Option<&[String]> {
        self.packages
            .get(package)?
            .vars
            .get(name)
            .map(OrderedSet::as_slice)
    }

    /// Maintenance scripts registered for a package
    pub fn rtupdates(&self, package: &str) -> &[MaintenanceScript] {
        self.packages
            .get(package)
            .map(|p| p.rtupdates.as_slice())
            .unwrap_or(&[])
    }

    /// Render a package's substvars file content
    pub fn render(&self, package: &str) -> String {
        let mut output = String::new();
        let Some(entry) = self.packages.get(package) else {
            return output;
        };
        for line in &entry.lines {
            match line {
                Line::Verbatim(text) => output.push_str(text),
                Line::Variable(name) => {
                    let values = match entry.vars.get(name) {
                        Some(values) if !values.is_empty() => values,
                        _ => continue,
                    };
                    let joined: Vec<&str> = values.iter().map(String::as_str).collect();
                    output.push_str(name);
                    output.push('=');
                    output.push_str(&joined.join(", "));
                },
            }
            output.push('\n');
        }
        output
    }

    /// Render maintenance-script registrations, one `dir args` line each
    pub fn render_rtupdates(&self, package: &str) -> String {
        let mut output = String::new();
        for script in self.rtupdates(package) {
            output.push_str(&script.dir);
            if !script.args.is_empty() {
                output.push(' ');
                output.push_str(&script.args);
            }
            output.push('\n');
        }
        output
    }

    fn package_mut(&mut self, package: &str) -> &mut PackageSubstvars {
        self.packages.entry(package.to_string()).or_default()
    }
}

impl PackageSubstvars {
    fn variable_mut(&mut self, name: &str) -> &mut OrderedSet<String> {
        if !self.vars.contains_key(name) {
            self.lines.push(Line::Variable(name.to_string()));
        }
        self.vars.entry(name.to_string()).or_default()
    }
}

impl MetadataSink for Substvars {
    fn add_substvar(&mut self, package: &str, name: &str, value: &str) {
        let values = self.package_mut(package).variable_mut(name);
        if !value.is_empty() {
            values.insert(value.to_string());
        }
    }

    fn add_rtupdate(&mut self, package: &str, dir: &str, args: &str) {
        self.package_mut(package)
            .rtupdates
            .insert(MaintenanceScript::new(dir, args));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::RelationSet;

    fn sample_relations() -> RelationSet {
        let mut relations = RelationSet::new("python3-foo");
        relations.add_depends("python3 (>= 3.5)");
        relations.add_depends("python3.5|python3.7");
        relations.add_suggests("python3-bar");
        relations.add_script("/usr/lib/foo", "-V 3.5-3.7 -X '*.pyc'");
        relations.add_script("/usr/share/foo", "");
        relations
    }

    #[test]
    fn test_render_exported_relations() {
        let mut substvars = Substvars::new();
        sample_relations().export(&mut substvars);

        assert_eq!(
            substvars.render("python3-foo"),
            "python3:Depends=python3 (>= 3.5), python3.5|python3.7\npython3:Suggests=python3-bar\n"
        );
        assert!(substvars.get("python3-foo", "python3:Enhances").is_none());
        assert!(substvars.get("python3-foo", "python3:Breaks").is_none());
    }

    #[test]
    fn test_render_rtupdates() {
        let mut substvars = Substvars::new();
        sample_relations().export(&mut substvars);

        assert_eq!(
            substvars.render_rtupdates("python3-foo"),
            "/usr/lib/foo -V 3.5-3.7 -X '*.pyc'\n/usr/share/foo\n"
        );
        assert!(substvars.rtupdates("other").is_empty());
    }

    #[test]
    fn test_merge_existing_file() {
        let mut substvars = Substvars::new();
        substvars.merge_existing(
            "python3-foo",
            "misc:Depends=debconf\npython3:Depends=python3 (>= 3.5), libc6\n",
        );
        sample_relations().export(&mut substvars);

        assert_eq!(
            substvars.get("python3-foo", "python3:Depends").unwrap(),
            &["python3 (>= 3.5)", "libc6", "python3.5|python3.7"]
        );
        assert!(substvars
            .render("python3-foo")
            .starts_with("misc:Depends=debconf\n"));
    }

    #[test]
    fn test_merge_keeps_foreign_lines_verbatim() {
        let existing = "# generated by dh_foo\nmisc:Foo=a,b,a\nempty:Var=\npython3:Depends=python3,  python3\n";
        let mut substvars = Substvars::new();
        substvars.merge_existing("p", existing);
        substvars.add_substvar("p", "python3:Depends", "python3.6");
        substvars.add_substvar("p", "python3:Suggests", "python3-bar");

        assert_eq!(
            substvars.render("p"),
            "# generated by dh_foo\nmisc:Foo=a,b,a\nempty:Var=\npython3:Depends=python3, python3.6\npython3:Suggests=python3-bar\n"
        );
        assert!(substvars.get("p", "misc:Foo").is_none());
    }

    #[test]
    fn test_merge_then_render_is_stable_without_new_values() {
        let existing = "misc:Depends=debconf (>= 0.5) | debconf-2.0\n\npython3:Depends=python3 (>= 3.5)\n";
        let mut substvars = Substvars::new();
        substvars.merge_existing("p", existing);

        assert_eq!(substvars.render("p"), existing);
    }

    #[test]
    fn test_packages_are_separate() {
        let mut substvars = Substvars::new();
        substvars.add_substvar("a", "python3:Depends", "python3");
        substvars.add_substvar("b", "python3:Depends", "python3-dbg");

        assert_eq!(substvars.render("a"), "python3:Depends=python3\n");
        assert_eq!(substvars.render("b"), "python3:Depends=python3-dbg\n");
        assert_eq!(substvars.render("c"), "");
    }
}
