use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's parsed `Cargo.toml`, used to find how a workspace crate is
/// reachable from the crate that invokes a derive.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name starts with `vc_` and the caller depends on
///    the facade crate `vc_cast`, return `::vc_cast::short_name`
///    (e.g. `vc_reflect` -> `::vc_cast::reflect`).
/// 3. Repeat steps 1-2 with `dev-dependencies`.
/// 4. Otherwise fall back to `::crate_name`.
///
/// A crate that derives on its own types should add
/// `extern crate self as vc_reflect;` so the fallback path resolves.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Option<Document<Box<str>>>,
    pub modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "vc_cast";
const CRATE_PREFIX: &str = "vc_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
    }

    fn read(path: &Path) -> Option<Document<Box<str>>> {
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(text).ok()
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments.push(syn::PathSegment::from(syn::Ident::new(
                segment,
                proc_macro2::Span::call_site(),
            )));
        }
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let short = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::absolute(&[FACADE_NAME, short]))
    }

    /// Returns the path of the package `name` as seen from the caller.
    ///
    /// See the type level documentation for the resolution order.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let Some(manifest) = &self.manifest else {
            return Self::absolute(&[name]);
        };
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|section| match manifest.get(section) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Runs `func` against the caller's manifest.
    ///
    /// Parsed manifests are cached per path and reparsed when the file's
    /// modification time changes. Call it once per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Manifest { manifest: None, modified_time: None });
        };
        let modified_time = Self::modified_time(&path);

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time.is_some()
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use toml_edit::{Document, Item};

    use super::Manifest;

    fn resolve(text: &str, name: &str) -> String {
        let manifest = Manifest {
            manifest: Some(Document::parse(Box::from(text)).unwrap()),
            modified_time: None,
        };
        manifest.get_crate_path(name).to_token_stream().to_string().replace(' ', "")
    }

    #[test]
    fn direct_dependency_wins() {
        let text = "[dependencies]\nvc_reflect = \"0.0.1\"\nvc_cast = \"0.0.1\"\n";
        assert_eq!(resolve(text, "vc_reflect"), "::vc_reflect");
    }

    #[test]
    fn facade_dependency() {
        let text = "[dependencies]\nvc_cast = { path = \"..\" }\n";
        assert_eq!(resolve(text, "vc_reflect"), "::vc_cast::reflect");
    }

    #[test]
    fn dev_dependencies_and_fallback() {
        let text = "[dev-dependencies]\nvc_reflect = \"0.0.1\"\n";
        assert_eq!(resolve(text, "vc_reflect"), "::vc_reflect");
        assert_eq!(resolve("[package]\nname = \"x\"\n", "vc_reflect"), "::vc_reflect");

        let doc = Document::parse(Box::<str>::from("[dependencies]\n")).unwrap();
        assert!(matches!(doc.get("dependencies"), Some(Item::Table(_))));
    }
}
