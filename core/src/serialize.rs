//! Query-string and form-body serialization of a `ParamBag`.
//!
//! # Design
//! The two paths differ in how they treat empty values and must stay
//! separate:
//! - `query_url` drops every key whose value `is_absent_or_empty`, so `0`
//!   and `false` vanish along with empty strings.
//! - `form_body` keeps every key. Callers that want a fallback for an empty
//!   value substitute it first with `ParamBag::with_default`.
//! - `query_url_keep_empty` mirrors a transport's own params option, which
//!   only skips undefined and null.
//!
//! Keys and values are always percent-encoded with form-urlencoded rules,
//! so a value such as `V600E&x=1` cannot inject an extra parameter.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::form_urlencoded;

use crate::params::{ParamBag, ParamValue};

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// `{base}?k1=v1&k2=v2` with absent or empty values dropped.
///
/// An empty bag (after filtering) still yields `{base}?`.
pub fn query_url(base: &str, params: &ParamBag) -> String {
    let query = encode_pairs(params.iter().filter(|(_, v)| !v.is_absent_or_empty()));
    format!("{base}?{query}")
}

/// `{base}?k1=v1&...` dropping only undefined and null values. Returns
/// `base` unchanged when nothing is left to append.
pub fn query_url_keep_empty(base: &str, params: &ParamBag) -> String {
    let query = encode_pairs(params.iter().filter(|(_, v)| !v.is_unset()));
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}

/// `application/x-www-form-urlencoded` body retaining every key.
pub fn form_body(params: &ParamBag) -> String {
    encode_pairs(params.iter())
}

/// Percent-encode one URL path segment.
///
/// Returns `None` for `.` and `..`. URL parsing collapses those segments
/// whether or not their dots are escaped (`%2E%2E` counts as `..`), so they
/// cannot be carried as data at all.
pub fn path_segment(segment: &str) -> Option<String> {
    if matches!(segment, "." | "..") {
        return None;
    }
    Some(utf8_percent_encode(segment, PATH_SEGMENT).to_string())
}

fn encode_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a ParamValue)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, &value.render());
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8080/api/var_annotation";

    #[test]
    fn query_drops_falsy_values() {
        let params = ParamBag::new()
            .with("hugoSymbol", "BRAF")
            .with("alteration", ParamValue::Undefined)
            .with("tumorType", "")
            .with("entrezGeneId", 0)
            .with("useServerCache", false)
            .with("source", "cbioportal");
        assert_eq!(
            query_url(BASE, &params),
            format!("{BASE}?hugoSymbol=BRAF&source=cbioportal")
        );
    }

    #[test]
    fn query_empty_bag_keeps_question_mark() {
        assert_eq!(query_url(BASE, &ParamBag::new()), format!("{BASE}?"));
        let all_empty = ParamBag::new().with("a", "").with("b", ParamValue::Null);
        assert_eq!(query_url(BASE, &all_empty), format!("{BASE}?"));
    }

    #[test]
    fn query_never_has_dangling_separators() {
        let params = ParamBag::new()
            .with("a", "")
            .with("b", "1")
            .with("c", false)
            .with("d", "2")
            .with("e", ParamValue::Undefined);
        let url = query_url(BASE, &params);
        assert!(!url.ends_with('&'));
        assert!(!url.contains("&&"));
        assert_eq!(url, format!("{BASE}?b=1&d=2"));
    }

    #[test]
    fn query_preserves_insertion_order() {
        let params = ParamBag::new().with("z", "1").with("a", "2").with("m", "3");
        assert_eq!(query_url(BASE, &params), format!("{BASE}?z=1&a=2&m=3"));
    }

    #[test]
    fn query_values_are_encoded() {
        let params = ParamBag::new()
            .with("alteration", "V600E&evil=1")
            .with("tumorType", "Lung Cancer");
        assert_eq!(
            query_url(BASE, &params),
            format!("{BASE}?alteration=V600E%26evil%3D1&tumorType=Lung+Cancer")
        );
    }

    #[test]
    fn keep_empty_only_drops_unset() {
        let params = ParamBag::new()
            .with("geneId", "")
            .with("flag", false)
            .with("skip", ParamValue::Null);
        assert_eq!(
            query_url_keep_empty("http://a.test/geneStatus.json", &params),
            "http://a.test/geneStatus.json?geneId=&flag=false"
        );
        assert_eq!(query_url_keep_empty("http://a.test/x", &ParamBag::new()), "http://a.test/x");
    }

    #[test]
    fn form_retains_defaulted_key() {
        let params = ParamBag::new()
            .with("geneId", "BRAF")
            .with("status", ParamValue::Undefined)
            .with_default("status", "Not ready");
        assert_eq!(form_body(&params), "geneId=BRAF&status=Not+ready");
    }

    #[test]
    fn form_keeps_empty_values() {
        let params = ParamBag::new()
            .with("cmd", "updateGene")
            .with("hugoSymbol", ParamValue::Undefined)
            .with("propagate", false);
        assert_eq!(form_body(&params), "cmd=updateGene&hugoSymbol=&propagate=false");
    }

    #[test]
    fn form_escapes_reserved_characters() {
        let params = ParamBag::new().with("reportParams", r#"{"a":"b c"}"#);
        assert_eq!(form_body(&params), "reportParams=%7B%22a%22%3A%22b+c%22%7D");
    }

    #[test]
    fn path_segment_escapes_separators() {
        assert_eq!(path_segment("Breast Cancer").as_deref(), Some("Breast%20Cancer"));
        assert_eq!(path_segment("a/b?c#d").as_deref(), Some("a%2Fb%3Fc%23d"));
        assert_eq!(path_segment("Non-Small_Cell").as_deref(), Some("Non-Small_Cell"));
    }

    #[test]
    fn path_segment_refuses_dot_segments() {
        assert_eq!(path_segment("."), None);
        assert_eq!(path_segment(".."), None);
        assert_eq!(path_segment("...").as_deref(), Some("..."));
        assert_eq!(path_segment("%2E%2E").as_deref(), Some("%252E%252E"));
        assert_eq!(path_segment("../x").as_deref(), Some("..%2Fx"));
    }
}
