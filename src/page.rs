use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::config::Config;
use crate::loader::Outcome;
use crate::theme::Theme;

const STYLE: &str = r#"
    :root { color-scheme: light dark; }
    body { margin: 0; font-family: system-ui, sans-serif; line-height: 1.6; }
    body.light-theme { --text-primary: #1d1d1f; --text-secondary: #6e6e73; --background: #ffffff; --accent-blue: #0071e3; }
    body.dark-theme { --text-primary: #f5f5f7; --text-secondary: #a1a1a6; --background: #000000; --accent-blue: #2997ff; }
    body { color: var(--text-primary); background: var(--background); }
    main { max-width: 48rem; margin: 0 auto; padding: 2rem 1.5rem; }
    a { color: var(--accent-blue); }
    .theme-toggle { position: fixed; top: 1rem; right: 1rem; }
    .theme-toggle button { cursor: pointer; border: none; background: none; font-size: 1.25rem; }
    .error-message { text-align: center; padding: 3rem; color: var(--text-secondary); }
    .error-message h2 { color: var(--text-primary); margin-bottom: 1rem; }
    .retry-button { background: var(--accent-blue); border: none; color: white; padding: 0.75rem 1.5rem; border-radius: 8px; font-weight: 600; cursor: pointer; margin-top: 1rem; transition: opacity 0.2s ease; }
    .retry-button:hover { opacity: 0.9; }
    .header-anchor { opacity: 0; margin-left: 0.5rem; color: var(--accent-blue); text-decoration: none; font-weight: normal; transition: opacity 0.2s ease; }
    h2:hover .header-anchor, h3:hover .header-anchor, h4:hover .header-anchor, h5:hover .header-anchor, h6:hover .header-anchor,
    h2:focus-within .header-anchor, h3:focus-within .header-anchor, h4:focus-within .header-anchor,
    h5:focus-within .header-anchor, h6:focus-within .header-anchor { opacity: 1; }
    .emoji { font-style: normal; font-weight: normal; }
"#;

/// The panel shown instead of the policy when nothing could be rendered.
pub fn error_panel(contact: &str) -> String {
    let contact_text = encode_text(contact);

    format!(
        concat!(
            "<div class=\"error-message\">",
            "<h2>Oops! Something went wrong</h2>",
            "<p>We couldn't load the privacy policy. Please try refreshing the page or contact us at ",
            "<a href=\"mailto:{}\">{}</a> if the problem persists.</p>",
            "<button onclick=\"window.location.reload()\" class=\"retry-button\">Try Again</button>",
            "</div>",
        ),
        encode_double_quoted_attribute(contact),
        contact_text,
    )
}

/// Fragment placed in the content container for an outcome, `None` for redirects.
pub fn content(config: &Config, outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Rendered(html) => Some(html.clone()),
        Outcome::Failed => Some(error_panel(&config.contact)),
        Outcome::Redirect(_) => None,
    }
}

pub fn render(config: &Config, theme: Theme, outcome: &Outcome) -> String {
    if let Outcome::Redirect(url) = outcome {
        return redirect(url);
    }

    shell(config, theme, &content(config, outcome).unwrap_or_default())
}

pub fn redirect(url: &str) -> String {
    let url = encode_double_quoted_attribute(url);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><meta http-equiv=\"refresh\" content=\"0; url={url}\"></head><body><a href=\"{url}\">Continue</a></body></html>\n"
    )
}

fn shell(config: &Config, theme: Theme, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body class="{theme}">
<form class="theme-toggle" method="post" action="/theme"><button type="submit" id="themeToggle" aria-label="Switch to {next} theme">{icon}</button></form>
<main>
<div id="{container}" class="loaded">{body}</div>
</main>
</body>
</html>
"#,
        title = encode_text(&config.title),
        style = STYLE,
        theme = theme.class(),
        next = theme.toggle(),
        icon = match theme {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        },
        container = encode_double_quoted_attribute(&config.content_container),
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use dom_query::Document;

    use crate::config::Config;
    use crate::loader::Outcome;
    use crate::theme::Theme;

    use super::{error_panel, render};

    #[test]
    fn rendered_content_in_container() {
        let config = Config::default();
        let res = render(&config, Theme::Dark, &Outcome::Rendered(format!("<h1>Policy</h1>")));
        let doc = Document::from(res);

        assert_eq!("<h1>Policy</h1>", doc.select("#privacy-content.loaded").inner_html().to_string());
        assert!(doc.select("body.dark-theme").exists());
        assert!(!doc.select("body.light-theme").exists());
        assert!(!doc.select(".error-message").exists());
    }

    #[test]
    fn failed_shows_exactly_the_panel() {
        let config = Config {
            contact: format!("privacy@example.com"),
            ..Config::default()
        };
        let res = render(&config, Theme::Light, &Outcome::Failed);
        let doc = Document::from(res);
        let container = doc.select("#privacy-content");

        assert_eq!(error_panel("privacy@example.com"), container.inner_html().to_string());
        assert_eq!(Some("mailto:privacy@example.com"), container.select(".error-message a").attr("href").as_deref());
        assert!(container.select("button.retry-button").exists());
    }

    #[test]
    fn redirect() {
        let res = render(&Config::default(), Theme::Light, &Outcome::Redirect(format!("/test.html")));

        assert!(res.contains("<meta http-equiv=\"refresh\" content=\"0; url=/test.html\">"));
    }

    #[test]
    fn anchors_revealed_for_every_decorated_level() {
        let res = render(&Config::default(), Theme::Light, &Outcome::Rendered(String::new()));

        for level in 2..=6 {
            assert!(res.contains(&format!("h{level}:hover .header-anchor")));
            assert!(res.contains(&format!("h{level}:focus-within .header-anchor")));
        }
    }

    #[test]
    fn custom_container() {
        let config = Config {
            content_container: format!("policy"),
            ..Config::default()
        };
        let doc = Document::from(render(&config, Theme::Light, &Outcome::Rendered(format!("<p>x</p>"))));

        assert!(doc.select("div#policy > p").exists());
    }
}
