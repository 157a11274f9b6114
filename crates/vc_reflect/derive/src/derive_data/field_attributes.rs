use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

/// Field level `#[reflect(...)]` attributes.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// Raw tag text, from `tag = "..."` or `rename = "..."`.
    pub tag: Option<LitStr>,
    /// `skip`: the field is not reflected at all.
    pub skip: bool,
    /// `embed`: the field's own fields are promoted into the parent.
    pub embed: bool,
}

impl FieldAttributes {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("tag") || meta.path.is_ident("rename") {
                    if res.tag.is_some() {
                        return Err(meta.error("a field takes at most one `tag` or `rename`"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    if meta.path.is_ident("rename") && lit.value().contains(',') {
                        return Err(syn::Error::new(
                            lit.span(),
                            "`rename` takes a bare name, use `tag` to add options",
                        ));
                    }
                    res.tag = Some(lit);
                } else if meta.path.is_ident("skip") {
                    res.skip = true;
                } else if meta.path.is_ident("embed") {
                    res.embed = true;
                } else {
                    return Err(meta.error(
                        "unsupported reflect attribute, expected `tag`, `rename`, `skip` or `embed`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(res)
    }
}
