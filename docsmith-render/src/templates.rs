//! Askama template definitions.

use askama::Template;
use docsmith_core::SubNavLink;

/// A navigation link to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub title: String,
}

/// A rendered documentation page.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    /// Browser title, e.g. "Tutorial - Installation".
    pub page_title: String,

    /// Converted markdown HTML.
    pub content: String,

    /// "On this page" links (already display-escaped).
    pub links: Vec<SubNavLink>,

    pub next_page: Option<NavLink>,
}

/// A per-book navigation fragment.
#[derive(Template)]
#[template(path = "nav.html")]
pub struct NavTemplate {
    pub book: String,
    pub items: Vec<NavLink>,
}

/// One article on the news page.
#[derive(Debug, Clone)]
pub struct ArticleView {
    pub title: String,
    pub link: String,
    pub date: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub alt: String,
}

/// The news page.
#[derive(Template)]
#[template(path = "news.html")]
pub struct NewsTemplate {
    pub page_title: String,
    pub articles: Vec<ArticleView>,
}

/// One testimonial entry.
#[derive(Debug, Clone)]
pub struct TestimonialView {
    pub name: String,
    pub avatar: String,
    pub link: String,
    pub provider: String,
    pub body_html: String,
}

/// The testimonials fragment.
#[derive(Template)]
#[template(path = "testimonials.html")]
pub struct TestimonialsTemplate {
    pub entries: Vec<TestimonialView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_template_renders_content_and_links() {
        let template = PageTemplate {
            page_title: "Tutorial - Installation".into(),
            content: "<h1 id=\"installation\">Installation</h1><p>Run it.</p>".into(),
            links: vec![SubNavLink {
                href: "#installation".into(),
                level: 1,
                title: "Installation".into(),
            }],
            next_page: Some(NavLink {
                href: "/tutorial/usage.html".into(),
                title: "Usage".into(),
            }),
        };

        let html = template.render().unwrap();

        assert!(html.contains("<title>Tutorial - Installation</title>"));
        assert!(html.contains("<h1 id=\"installation\">Installation</h1>"));
        assert!(html.contains("href=\"#installation\""));
        assert!(html.contains("href=\"/tutorial/usage.html\""));
    }

    #[test]
    fn test_page_template_without_next_page() {
        let template = PageTemplate {
            page_title: "Docs - Last".into(),
            content: "<p>end</p>".into(),
            links: vec![],
            next_page: None,
        };

        let html = template.render().unwrap();

        assert!(!html.contains("page-next"));
    }

    #[test]
    fn test_nav_template_lists_pages() {
        let template = NavTemplate {
            book: "tutorial".into(),
            items: vec![
                NavLink {
                    href: "/tutorial/welcome.html".into(),
                    title: "Welcome".into(),
                },
                NavLink {
                    href: "/tutorial/usage.html".into(),
                    title: "Usage".into(),
                },
            ],
        };

        let html = template.render().unwrap();

        assert!(html.contains("data-book=\"tutorial\""));
        assert!(html.contains("/tutorial/welcome.html"));
        assert!(html.contains(">Usage</a>"));
    }

    #[test]
    fn test_news_template_renders_articles() {
        let template = NewsTemplate {
            page_title: "News".into(),
            articles: vec![ArticleView {
                title: "Big Release".into(),
                link: "https://example.com/release".into(),
                date: "April 14, 2020".into(),
                description: "Everything is new.".into(),
                tags: vec!["Article".into()],
                image: Some("https://example.com/cover.png".into()),
                alt: "cover".into(),
            }],
        };

        let html = template.render().unwrap();

        assert!(html.contains("Big Release"));
        assert!(html.contains("https://example.com/cover.png"));
        assert!(html.contains("April 14, 2020"));
    }

    #[test]
    fn test_testimonials_fragment() {
        let template = TestimonialsTemplate {
            entries: vec![TestimonialView {
                name: "Alex Example".into(),
                avatar: "https://example.com/a.png".into(),
                link: "https://social.example/alex".into(),
                provider: "Twitter".into(),
                body_html: "<p>Loved it.</p>".into(),
            }],
        };

        let html = template.render().unwrap();

        assert!(html.contains("Alex Example"));
        assert!(html.contains("<p>Loved it.</p>"));
    }
}
