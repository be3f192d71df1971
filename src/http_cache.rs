use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{
    ACCEPT, ETAG, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
};

// Process-lifetime only; nothing is written to disk.
static CACHE: Mutex<Option<HashMap<String, CacheEntry>>> = Mutex::new(None);

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
}

/// GET `url` as text, revalidating against the previous response with
/// `If-None-Match` / `If-Modified-Since`. A 304 answers from memory.
pub fn fetch_json_cached(client: &Client, url: &str) -> Result<String> {
    let cached = lookup(url);

    let mut req = client.get(url).header(ACCEPT, "application/json");
    if let Some(entry) = cached.as_ref() {
        if let Some(etag) = entry.etag.as_ref() {
            req = req.header(IF_NONE_MATCH, etag);
        }
        if let Some(last_modified) = entry.last_modified.as_ref() {
            req = req.header(IF_MODIFIED_SINCE, last_modified);
        }
    }

    let resp = req.send().with_context(|| format!("GET {url} failed"))?;
    let status = resp.status();
    if status == StatusCode::NOT_MODIFIED {
        return cached
            .map(|entry| entry.body)
            .ok_or_else(|| anyhow!("received 304 without cached body for {url}"));
    }

    let headers = resp.headers().clone();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {status} for {url}"));
    }

    let header_value = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };
    let entry = CacheEntry {
        body: body.clone(),
        etag: header_value(ETAG),
        last_modified: header_value(LAST_MODIFIED),
    };
    if entry.etag.is_some() || entry.last_modified.is_some() {
        store(url, entry);
    }
    Ok(body)
}

fn lookup(url: &str) -> Option<CacheEntry> {
    let guard = CACHE.lock().ok()?;
    guard.as_ref()?.get(url).cloned()
}

fn store(url: &str, entry: CacheEntry) {
    if let Ok(mut guard) = CACHE.lock() {
        guard
            .get_or_insert_with(HashMap::new)
            .insert(url.to_string(), entry);
    }
}
