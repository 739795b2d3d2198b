//! HTML and JSON-LD rendering for the jobs embed.
//!
//! Consumes normalized [`JobRecord`]s; every failure mode upstream has
//! already been collapsed into a single error value by the time rendering
//! happens, so this module only distinguishes "jobs", "no jobs", and
//! "unable to load".

use std::fmt::Write as _;

use chrono::NaiveDate;
use monday_client::JobRecord;

use crate::config::DisplayOptions;

/// Render the embeddable list fragment for a non-empty result set.
pub fn render_jobs_html(jobs: &[JobRecord], display: &DisplayOptions) -> String {
    let mut html = String::new();

    if display.show_count {
        let label = if jobs.len() == 1 {
            "open position"
        } else {
            "open positions"
        };
        let _ = write!(
            html,
            r#"<div class="jobs-count" style="margin-bottom:.5rem;font-weight:600;">{} {}</div>"#,
            jobs.len(),
            label
        );
    }

    html.push_str(r#"<div class="jobs-list">"#);
    for job in jobs {
        html.push_str(r#"<div class="jobs-item" style="margin:0 0 1rem 0;">"#);
        let _ = write!(
            html,
            r#"<div class="jobs-title" style="font-weight:600;">{}</div>"#,
            escape_html(&job.name)
        );

        let date = format_date(&job.date, &display.date_format);
        let meta: Vec<&str> = [job.location.as_str(), date.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        if !meta.is_empty() {
            let _ = write!(
                html,
                r#"<div class="jobs-meta" style="opacity:.8;">{}</div>"#,
                escape_html(&meta.join(" • "))
            );
        }

        if !job.description.is_empty() && display.desc_words != 0 {
            let excerpt = trim_words(&job.description, display.desc_words);
            let _ = write!(
                html,
                r#"<div class="jobs-desc" style="margin-top:.25rem;">{}</div>"#,
                escape_html(&excerpt)
            );
        }

        if !job.apply_url.is_empty() {
            let _ = write!(
                html,
                r#"<div class="jobs-apply" style="margin-top:.25rem;"><a href="{}" target="_blank" rel="noopener">{}</a></div>"#,
                escape_html(&job.apply_url),
                escape_html(&display.apply_label)
            );
        }

        html.push_str("</div>");
    }
    html.push_str("</div>");

    if display.enable_schema {
        let schemas = job_posting_schema(jobs, display);
        let _ = write!(
            html,
            r#"<script type="application/ld+json">{}</script>"#,
            schemas
        );
    }

    html
}

/// "No openings" state; distinct from the error state on purpose.
pub fn render_empty(display: &DisplayOptions) -> String {
    format!(
        r#"<div class="jobs-empty">{}</div>"#,
        escape_html(&display.empty_text)
    )
}

/// Uniform message for every fetch failure. Detail goes to the privileged
/// debug view only.
pub fn render_error() -> String {
    r#"<div class="jobs-error">Unable to load jobs. Please try again later.</div>"#.to_string()
}

/// Privileged debug dump, prepended to whichever state renders.
pub fn render_debug(dump: &str) -> String {
    format!(
        r#"<pre style="background:#111;color:#0f0;padding:10px;overflow:auto">{}</pre>"#,
        escape_html(dump)
    )
}

/// JobPosting JSON-LD for search engines, one entry per job.
pub fn job_posting_schema(jobs: &[JobRecord], display: &DisplayOptions) -> serde_json::Value {
    let schemas: Vec<serde_json::Value> = jobs
        .iter()
        .map(|job| {
            serde_json::json!({
                "@context": "https://schema.org",
                "@type": "JobPosting",
                "title": job.name,
                "datePosted": job.date,
                "hiringOrganization": {
                    "@type": "Organization",
                    "name": display.org_name,
                },
                "jobLocation": {
                    "@type": "Place",
                    "address": {
                        "@type": "PostalAddress",
                        "addressLocality": job.location,
                    }
                },
                "description": job.description,
            })
        })
        .collect();
    serde_json::Value::Array(schemas)
}

/// monday date columns report text as `YYYY-MM-DD`; reformat for display,
/// falling back to the raw text for anything unparseable.
fn format_date(raw: &str, format: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => {
            let mut out = String::new();
            // A malformed user-supplied format string errors at write time.
            if write!(out, "{}", date.format(format)).is_ok() {
                out
            } else {
                raw.to_string()
            }
        }
        Err(_) => raw.to_string(),
    }
}

/// Cap `text` at `max` whitespace-separated words, appending an ellipsis
/// when anything was dropped.
fn trim_words(text: &str, max: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max {
        words.join(" ")
    } else {
        let mut out = words[..max].join(" ");
        out.push('…');
        out
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
