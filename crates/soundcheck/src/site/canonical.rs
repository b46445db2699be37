//! Post-build canonical-link rewrite.
//!
//! Search engines see the initial HTML document, not anything a script
//! injects later, so each route gets its own copy of the built page
//! carrying the correct `<link rel="canonical">`. Any canonical link
//! already present is stripped first so each file carries exactly one.

use std::fs;
use std::path::Path;

use crate::error::CliError;

/// Route fragments and their output files.
const ROUTES: [(&str, &str); 7] = [
    ("", "index.html"),
    ("about", "about.html"),
    ("services", "services.html"),
    ("media", "media.html"),
    ("testimonials", "testimonials.html"),
    ("contact", "contact.html"),
    ("book", "book.html"),
];

/// Rewrite the built site: for every route, emit a copy of
/// `dist/index.html` with that route's canonical link. Returns the file
/// names written.
pub fn rewrite_dist(dist: &Path, base_url: &str) -> Result<Vec<String>, CliError> {
    let index_path = dist.join("index.html");
    let base_html = fs::read_to_string(&index_path).map_err(|e| CliError::Validation {
        field: "dist".into(),
        reason: format!("cannot read {}: {e}", index_path.display()),
    })?;

    let base_html = strip_canonical_links(&base_html);
    let base_url = base_url.trim_end_matches('/');

    let mut written = Vec::with_capacity(ROUTES.len());
    for (route, file) in ROUTES {
        let canonical_url = if route.is_empty() {
            format!("{base_url}/")
        } else {
            format!("{base_url}/{route}")
        };
        let tag = format!("\n    <link rel=\"canonical\" href=\"{canonical_url}\" />");
        let with_canonical = base_html.replacen("</head>", &format!("{tag}\n  </head>"), 1);

        fs::write(dist.join(file), with_canonical)?;
        written.push(file.to_owned());
    }

    Ok(written)
}

/// Remove every existing `<link … rel="canonical" …>` tag.
fn strip_canonical_links(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find("<link") {
        let Some(end) = rest[start..].find('>') else {
            break;
        };
        let tag = &rest[start..=start + end];
        out.push_str(&rest[..start]);
        if !tag.contains("rel=\"canonical\"") {
            out.push_str(tag);
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);
    out
}
