// src/services/sitemap.rs
// DOCUMENTATION: sitemap.xml and robots.txt generation
// PURPOSE: Static page list plus published landmarks and events

use crate::db::ContentStore;
use crate::models::{EventFilter, ModerationStatus};
use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Public pages: (path, priority, change frequency)
const STATIC_PAGES: [(&str, f32, ChangeFrequency); 8] = [
    ("", 1.0, ChangeFrequency::Weekly),
    ("/landmarks", 0.9, ChangeFrequency::Weekly),
    ("/events", 0.9, ChangeFrequency::Daily),
    ("/dining", 0.8, ChangeFrequency::Monthly),
    ("/accommodation", 0.8, ChangeFrequency::Monthly),
    ("/history", 0.7, ChangeFrequency::Monthly),
    ("/transport", 0.6, ChangeFrequency::Monthly),
    ("/submit-event", 0.5, ChangeFrequency::Monthly),
];

/// Paths crawlers should skip
const DISALLOWED_PATHS: [&str; 6] = [
    "/admin/",
    "/account/",
    "/api/",
    "/login",
    "/register",
    "/forgot-password",
];

pub struct SitemapService;

impl SitemapService {
    pub fn static_entries(base_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
        let base = base_url.trim_end_matches('/');
        STATIC_PAGES
            .iter()
            .map(|(path, priority, frequency)| SitemapEntry {
                loc: format!("{}{}", base, if path.is_empty() { "/" } else { path }),
                last_modified: now,
                change_frequency: *frequency,
                priority: *priority,
            })
            .collect()
    }

    /// Static pages, then published landmarks and events
    /// DOCUMENTATION: A failing store drops its dynamic entries only
    pub async fn entries(
        store: &dyn ContentStore,
        base_url: &str,
        now: DateTime<Utc>,
    ) -> Vec<SitemapEntry> {
        let base = base_url.trim_end_matches('/');
        let mut entries = Self::static_entries(base, now);

        match store.list_landmarks(Some(ModerationStatus::Published)).await {
            Ok(landmarks) => entries.extend(landmarks.iter().map(|l| SitemapEntry {
                loc: format!("{}/landmarks/{}", base, l.id),
                last_modified: l.updated_at.or(l.created_at).unwrap_or(now),
                change_frequency: ChangeFrequency::Monthly,
                priority: 0.7,
            })),
            Err(e) => log::error!("Sitemap: failed to load landmarks: {}", e),
        }

        match store.list_events(&EventFilter::published()).await {
            Ok(events) => entries.extend(events.iter().map(|e| SitemapEntry {
                loc: format!("{}/events/{}", base, e.id),
                last_modified: e.created_at.unwrap_or(now),
                change_frequency: ChangeFrequency::Weekly,
                priority: 0.6,
            })),
            Err(e) => log::error!("Sitemap: failed to load events: {}", e),
        }

        entries
    }

    pub fn render_xml(entries: &[SitemapEntry]) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for entry in entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.change_frequency.as_str()
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }

    pub fn robots_txt(base_url: &str) -> String {
        let mut robots = String::from("User-agent: *\nAllow: /\n");
        for path in DISALLOWED_PATHS {
            robots.push_str(&format!("Disallow: {}\n", path));
        }
        robots.push_str(&format!(
            "\nSitemap: {}/sitemap.xml\n",
            base_url.trim_end_matches('/')
        ));
        robots
    }
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
