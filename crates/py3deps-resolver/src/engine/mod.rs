//! Dependency generation policy engine
//!
//! Turns the scan statistics of one binary package into its Python 3
//! relations and byte-compile maintenance scripts. Rules run in a fixed
//! order and only ever add to the RelationSet; none of them can fail.

use indexmap::IndexSet;
use tracing::{debug, info};

use py3deps_core::types::{
    InterpreterPolicy, PrivateDirDetails, Relation, ResolverOptions, ScanStatistics, Version,
    VersionRange,
};

use crate::pydist::{PyDist, RequirementTranslator};
use crate::relations::RelationSet;


/// Suffix marking debug-interpreter binary packages
const DEBUG_SUFFIX: &str = "-dbg";

/// Resolver applying the interpreter policy to scan statistics
#[derive(Debug, Clone)]
pub struct DependencyResolver<T = PyDist> {
    /// Default and supported interpreter versions
    policy: InterpreterPolicy,
    /// Translator for requirement files and operator-supplied relations
    translator: T,
}

impl DependencyResolver<PyDist> {
    /// Create a resolver using the heuristic requirement translator
    pub fn new(policy: InterpreterPolicy) -> Self {
        Self::with_translator(policy, PyDist::new())
    }
}

impl<T: RequirementTranslator> DependencyResolver<T> {
    /// Create a resolver with a custom requirement translator
    pub fn with_translator(policy: InterpreterPolicy, translator: T) -> Self {
        Self { policy, translator }
    }

    pub fn policy(&self) -> &InterpreterPolicy {
        &self.policy
    }

    /// Compute the relations one binary package must declare
    pub fn resolve(
        &self,
        package: &str,
        stats: &ScanStatistics,
        options: &ResolverOptions,
    ) -> RelationSet {
        debug!("generating dependencies for package {}", package);

        let mut relations = RelationSet::new(package);
        let flavor = interpreter_flavor(package);

        if let Some(vrange) = &options.vrange {
            self.pin_version_window(&mut relations, flavor, vrange);
        }
        self.bound_extension_abi(&mut relations, flavor, stats);

        if stats.compile {
            relations.add_depends(InterpreterPolicy::compile_dependency());
        }

        // any interpreter named in a shebang is a hard dependency
        for shebang in &stats.shebangs {
            relations.add_depends(shebang.interpreter.as_str());
        }

        for (dir, details) in &stats.private_dirs {
            self.resolve_private_dir(&mut relations, dir, details, options);
        }

        if options.guess_deps {
            for path in &stats.requires {
                for relation in self.translator.parse_requirements_file(path) {
                    relations.add_depends(relation);
                }
            }
        }

        for item in &options.depends {
            relations.add_depends(self.translator.guess_constraint(item));
        }
        for item in &options.recommends {
            relations.add_recommends(self.translator.guess_constraint(item));
        }
        for item in &options.suggests {
            relations.add_suggests(self.translator.guess_constraint(item));
        }

        debug!("{}", relations);
        relations
    }

    /// Block interpreter transitions outside the requested window
    fn pin_version_window(&self, relations: &mut RelationSet, flavor: &str, vrange: &VersionRange) {
        if let Some(minv) = vrange.min {
            relations.add_depends(Relation::at_least(flavor, minv));
        }
        if let Some(maxv) = vrange.max {
            relations.add_depends(Relation::below(flavor, maxv));
        }
    }

    /// Bound the interpreter by the extension ABIs, only on the sides that cross the default
    fn bound_extension_abi(&self, relations: &mut RelationSet, flavor: &str, stats: &ScanStatistics) {
        let (Some(&minv), Some(&maxv)) = (stats.ext.first(), stats.ext.last()) else {
            return;
        };
        let default = self.policy.default_version;

        if minv <= default {
            relations.add_depends(Relation::at_least(flavor, minv));
        }
        if maxv >= default {
            relations.add_depends(Relation::below(flavor, maxv.bump_minor()));
        }
    }

    fn resolve_private_dir(
        &self,
        relations: &mut RelationSet,
        dir: &str,
        details: &PrivateDirDetails,
        options: &ResolverOptions,
    ) {
        let versions: IndexSet<Version> = details.shebangs.iter().filter_map(|s| s.version).collect();
        for version in versions {
            if self.policy.is_supported(&version) {
                relations.add_depends(version.interpreter_name());
            } else {
                info!(
                    "dependency on python{} (from shebang) ignored - it's not supported anymore",
                    version
                );
            }
        }

        // /usr/bin/python3 shebang
        if details.shebangs.iter().any(|s| s.version.is_none()) {
            relations.add_depends("python3");
        }

        if !details.compile {
            return;
        }
        relations.add_depends(InterpreterPolicy::compile_dependency());

        let vrange = VersionRange::spanning(details.ext.iter().copied()).or(options.vrange);
        let mut args = Vec::new();

        if let Some(vr) = vrange {
            args.push(format!("-V {}", vr));

            if !details.ext.is_empty() {
                relations.add_depends(Relation::any_interpreter(details.ext.iter().copied()));
            } else {
                // pure modules only
                if let Some(minv) = vr.min {
                    relations.add_depends(Relation::at_least("python3", minv));
                }
                if let Some(maxv) = vr.max {
                    relations.add_depends(Relation::below("python3", maxv.bump_minor()));
                }
            }
        }

        for pattern in &options.regexpr {
            args.push(format!("-X '{}'", shell_escape_quoted(pattern)));
        }

        relations.add_script(dir, args.join(" "));
    }
}

/// Interpreter package a binary package's version bounds apply to
fn interpreter_flavor(package: &str) -> &'static str {
    if package.ends_with(DEBUG_SUFFIX) {
        "python3-dbg"
    } else {
        "python3"
    }
}

/// Escape single quotes for embedding inside a single-quoted shell word
fn shell_escape_quoted(value: &str) -> String {
    value.replace('\'', r"'\''")
}
