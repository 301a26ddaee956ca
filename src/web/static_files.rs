//! Static assets for the web UI.
//!
//! Embedded directly in the binary for easy deployment.

use axum::{http::header, response::IntoResponse};

/// CSS styles for the web UI.
pub const CSS: &str = r#"
:root {
    --bg-primary: #0e1117;
    --bg-secondary: #161a23;
    --bg-tertiary: #262730;
    --text-primary: #fafafa;
    --text-secondary: #a3a8b8;
    --accent: #00ff00;
    --info: #1c83e1;
    --success: #21c354;
    --error: #ff4b4b;
    --border: #31333f;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: "Source Sans Pro", -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    line-height: 1.6;
    display: flex;
    min-height: 100vh;
}

aside {
    width: 260px;
    background: var(--bg-secondary);
    border-right: 1px solid var(--border);
    padding: 24px 16px;
    display: flex;
    flex-direction: column;
}

aside h2 {
    font-size: 1.2rem;
    margin-bottom: 16px;
}

aside nav a {
    display: block;
    color: var(--text-secondary);
    text-decoration: none;
    padding: 8px 12px;
    border-radius: 6px;
}

aside nav a:hover, aside nav a.active {
    color: var(--text-primary);
    background: var(--bg-tertiary);
}

aside footer {
    margin-top: auto;
    border-top: 1px solid var(--border);
    padding-top: 12px;
    font-size: 0.9rem;
    color: var(--text-secondary);
}

main {
    flex: 1;
    padding: 48px 64px;
    max-width: 1200px;
}

h1 {
    color: var(--accent);
    margin-bottom: 16px;
}

h3 {
    margin: 24px 0 8px;
}

.main-title {
    color: var(--accent);
    text-align: center;
    font-size: 48px;
    font-weight: bold;
}

.sub-title {
    color: var(--accent);
    text-align: center;
    font-size: 24px;
    margin-bottom: 40px;
}

.columns {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 32px;
}

.metric {
    margin-bottom: 20px;
}

.metric .label {
    color: var(--text-secondary);
    font-size: 0.9rem;
}

.metric .value {
    font-size: 2.2rem;
}

.notice {
    border-radius: 6px;
    padding: 14px 18px;
    margin: 12px 0;
}

.notice.info { background: rgba(28, 131, 225, 0.15); }
.notice.success { background: rgba(33, 195, 84, 0.15); }
.notice.error { background: rgba(255, 75, 75, 0.15); }
.notice.warning { background: rgba(255, 189, 69, 0.15); }

form {
    margin: 24px 0;
}

form label {
    display: block;
    margin-bottom: 6px;
}

form input[type="text"] {
    width: 100%;
    padding: 10px 12px;
    background: var(--bg-tertiary);
    border: 1px solid var(--border);
    border-radius: 6px;
    color: var(--text-primary);
    font-size: 1rem;
}

form button {
    margin-top: 12px;
    padding: 10px 18px;
    background: var(--error);
    border: none;
    border-radius: 6px;
    color: white;
    font-size: 1rem;
    cursor: pointer;
}

pre {
    background: var(--bg-tertiary);
    border-radius: 6px;
    padding: 12px 16px;
    overflow-x: auto;
    margin: 6px 0;
}

table {
    border-collapse: collapse;
    width: 100%;
}

th, td {
    border: 1px solid var(--border);
    padding: 8px 12px;
    text-align: left;
}

th {
    background: var(--bg-secondary);
}

details {
    margin-top: 32px;
}

details summary {
    cursor: pointer;
}
"#;

/// Serve CSS styles.
pub async fn serve_css() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        CSS,
    )
}
