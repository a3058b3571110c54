//! HTML rendering for the web interface.
//!
//! Plain string building over [`LibraryView`]; every value taken from
//! the filesystem or the library file is HTML-escaped.

use std::fmt::Write;

use crate::core::types::{DirectoryListing, LibraryView};

const STYLESHEET: &str = "/static/style.css";

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"{STYLESHEET}\">\n</head>\n\
         <body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

/// Index page: tunnel links, one section per directory, update form
pub fn library_page(view: &LibraryView) -> String {
    let mut body = String::new();
    body.push_str("<h1>Music Library</h1>\n");

    if !view.tunnel_domains.is_empty() {
        body.push_str("<section class=\"tunnels\">\n<h2>Public URLs</h2>\n<ul>\n");
        for domain in &view.tunnel_domains {
            let domain = escape_html(domain);
            let _ = writeln!(body, "<li><a href=\"https://{domain}\">{domain}</a></li>");
        }
        body.push_str("</ul>\n</section>\n");
    }

    if view.directories.is_empty() {
        body.push_str("<p class=\"empty\">No directories configured yet.</p>\n");
    }

    for listing in &view.directories {
        directory_section(&mut body, listing);
    }

    body.push_str(
        "<section class=\"update\">\n<h2>Add to library</h2>\n\
         <form method=\"post\" action=\"/update\">\n\
         <label>Directory <input type=\"text\" name=\"directory\" placeholder=\"/path/to/music\"></label>\n\
         <label>Tunnel domain <input type=\"text\" name=\"ngrok\" placeholder=\"example.ngrok.app\"></label>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n</section>\n",
    );

    page("Music Library", &body)
}

fn directory_section(body: &mut String, listing: &DirectoryListing) {
    let _ = writeln!(
        body,
        "<section class=\"directory\">\n<h2>{}</h2>",
        escape_html(&listing.path)
    );

    if let Some(error) = &listing.error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape_html(error));
    } else if listing.files.is_empty() {
        body.push_str("<p class=\"empty\">No audio files found.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for file in &listing.files {
            // Encoded paths are already URL-safe; escape for the attribute only
            let url = escape_html(&listing.file_url(file));
            let _ = writeln!(
                body,
                "<li><a href=\"{url}\">{}</a>\
                 <audio controls preload=\"none\" src=\"{url}\"></audio></li>",
                escape_html(&file.name)
            );
        }
        body.push_str("</ul>\n");
    }

    body.push_str("</section>\n");
}

/// Error page with a link back to the listing
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to library</a></p>\n",
        escape_html(title),
        escape_html(message)
    );
    page(title, &body)
}
