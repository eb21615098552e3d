//! Response shapes of the MediaWiki action API (`formatversion=2`) and the
//! pure functions that interpret them.

use serde::Deserialize;

/// Top-level body of every `action=query` response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub query: Option<T>,
    pub error: Option<RemoteError>,
}

/// Error object MediaWiki returns with a 200 status.
#[derive(Debug, Deserialize)]
pub struct RemoteError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// `list=search` results.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

/// `prop=...` results keyed by page.
#[derive(Debug, Default, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    pub extract: Option<String>,
    pub fullurl: Option<String>,
    pub pageprops: Option<PageProps>,
    #[serde(default)]
    pub links: Vec<PageLink>,
}

#[derive(Debug, Deserialize)]
pub struct PageProps {
    pub disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct PageLink {
    pub title: String,
}

/// What a page lookup turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
    Missing,
    Disambiguation { title: String },
    Article {
        title: String,
        summary: String,
        content: String,
        url: String,
    },
}

/// Title of the best search hit, if any.
pub fn top_title(query: Option<SearchQuery>) -> Option<String> {
    query
        .unwrap_or_default()
        .search
        .into_iter()
        .next()
        .map(|hit| hit.title)
}

/// Classify the first page of a `prop=extracts|info|pageprops` response.
pub fn interpret_page(query: Option<PagesQuery>) -> PageLookup {
    let Some(page) = query.unwrap_or_default().pages.into_iter().next() else {
        return PageLookup::Missing;
    };
    if page.missing || page.invalid {
        return PageLookup::Missing;
    }

    let is_disambiguation = page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.disambiguation.is_some());
    if is_disambiguation {
        return PageLookup::Disambiguation { title: page.title };
    }

    let content = page.extract.unwrap_or_default().trim().to_string();
    let url = page
        .fullurl
        .unwrap_or_else(|| wikicache_core::article::canonical_url(&page.title));
    PageLookup::Article {
        summary: lead_section(&content).to_string(),
        title: page.title,
        content,
        url,
    }
}

/// Link titles of the first page, capped at `limit`.
pub fn link_titles(query: Option<PagesQuery>, limit: usize) -> Vec<String> {
    query
        .unwrap_or_default()
        .pages
        .into_iter()
        .next()
        .map(|page| {
            page.links
                .into_iter()
                .map(|link| link.title)
                .take(limit)
                .collect()
        })
        .unwrap_or_default()
}

/// Text before the first section heading of a plain-text extract.
pub fn lead_section(extract: &str) -> &str {
    let end = extract
        .match_indices('\n')
        .find(|(pos, _)| extract[pos + 1..].starts_with("=="))
        .map_or(extract.len(), |(pos, _)| pos);
    extract[..end].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(json: &str) -> Option<PagesQuery> {
        serde_json::from_str::<Envelope<PagesQuery>>(json)
            .unwrap()
            .query
    }

    #[test]
    fn picks_first_search_hit() {
        let body = r#"{"batchcomplete":true,"query":{"searchinfo":{"totalhits":2},
            "search":[{"ns":0,"title":"Turing machine","pageid":30403},
                      {"ns":0,"title":"Universal Turing machine","pageid":1}]}}"#;
        let envelope: Envelope<SearchQuery> = serde_json::from_str(body).unwrap();
        assert_eq!(top_title(envelope.query).as_deref(), Some("Turing machine"));
    }

    #[test]
    fn empty_search_has_no_title() {
        let envelope: Envelope<SearchQuery> =
            serde_json::from_str(r#"{"query":{"search":[]}}"#).unwrap();
        assert_eq!(top_title(envelope.query), None);
        assert_eq!(top_title(None), None);
    }

    #[test]
    fn article_page_is_parsed() {
        let lookup = interpret_page(pages(
            r#"{"query":{"pages":[{"pageid":30403,"ns":0,"title":"Turing machine",
                "extract":"A Turing machine is a model.\nIt manipulates symbols.\n\n== History ==\nIn 1936...",
                "fullurl":"https://en.wikipedia.org/wiki/Turing_machine"}]}}"#,
        ));

        assert_eq!(
            lookup,
            PageLookup::Article {
                title: "Turing machine".into(),
                summary: "A Turing machine is a model.\nIt manipulates symbols.".into(),
                content: "A Turing machine is a model.\nIt manipulates symbols.\n\n== History ==\nIn 1936..."
                    .into(),
                url: "https://en.wikipedia.org/wiki/Turing_machine".into(),
            }
        );
    }

    #[test]
    fn missing_url_falls_back_to_canonical() {
        let lookup = interpret_page(pages(
            r#"{"query":{"pages":[{"title":"Ada Lovelace","extract":"Mathematician."}]}}"#,
        ));
        let PageLookup::Article { url, .. } = lookup else {
            panic!("expected an article");
        };
        assert_eq!(url, "https://en.wikipedia.org/wiki/Ada_Lovelace");
    }

    #[test]
    fn disambiguation_property_is_detected() {
        let lookup = interpret_page(pages(
            r#"{"query":{"pages":[{"title":"Mercury","extract":"Mercury may refer to:",
                "pageprops":{"disambiguation":""}}]}}"#,
        ));
        assert_eq!(
            lookup,
            PageLookup::Disambiguation {
                title: "Mercury".into()
            }
        );
    }

    #[test]
    fn missing_page_is_reported() {
        assert_eq!(
            interpret_page(pages(r#"{"query":{"pages":[{"title":"Nope","missing":true}]}}"#)),
            PageLookup::Missing
        );
        assert_eq!(interpret_page(None), PageLookup::Missing);
    }

    #[test]
    fn link_titles_are_capped() {
        let query = pages(
            r#"{"query":{"pages":[{"title":"Mercury","links":[
                {"ns":0,"title":"Mercury (planet)"},
                {"ns":0,"title":"Mercury (element)"},
                {"ns":0,"title":"Mercury (mythology)"}]}]}}"#,
        );
        assert_eq!(
            link_titles(query, 2),
            vec!["Mercury (planet)", "Mercury (element)"]
        );
    }

    #[test]
    fn lead_section_without_headings_is_whole_text() {
        assert_eq!(lead_section("  Only an intro.  "), "Only an intro.");
    }

    #[test]
    fn remote_error_is_deserialized() {
        let envelope: Envelope<PagesQuery> = serde_json::from_str(
            r#"{"error":{"code":"badvalue","info":"Unrecognized value."}}"#,
        )
        .unwrap();
        let error = envelope.error.unwrap();
        assert_eq!(error.code, "badvalue");
        assert_eq!(error.info, "Unrecognized value.");
    }
}
