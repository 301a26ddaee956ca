//! Server-rendered pages: Home, About, Query Assistant.
//!
//! Every piece of user or model text goes through [`escape_html`].

use crate::assistant::Answer;
use crate::db::FixtureSummary;
use crate::llm::EXAMPLE_QUESTIONS;
use std::fmt::Write;

/// Navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Query,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::About, Page::Query];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Query => "/query",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::About => "📖 About",
            Page::Query => "🧠 Intelligent Query",
        }
    }
}

/// State of the Query Assistant view after a submit.
#[derive(Debug)]
pub enum QueryOutcome {
    /// Page opened, nothing submitted
    Idle,
    /// Button pressed with a blank question; the model was not called
    Blank,
    Answered(Answer),
    /// Translation or execution failed; `sql` is set when translation succeeded
    Failed { sql: Option<String>, message: String },
}

/// Escape text for HTML element and attribute context.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Wrap page content in the document shell with sidebar navigation.
fn layout(active: Page, model_label: &str, content: &str) -> String {
    let mut nav = String::new();
    for page in Page::ALL {
        let class = if page == active { " class=\"active\"" } else { "" };
        let _ = write!(
            nav,
            "<a href=\"{}\"{}>{}</a>",
            page.path(),
            class,
            page.nav_label()
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>IntelliSQL</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <aside>
        <h2>🧭 Navigation</h2>
        <nav>{nav}</nav>
        <footer>Powered by {model} 🚀</footer>
    </aside>
    <main>
{content}
    </main>
</body>
</html>
"#,
        nav = nav,
        model = escape_html(model_label),
        content = content
    )
}

/// Home page. `summary` is `None` when the fixture cannot be read.
pub fn render_home(model_label: &str, summary: Option<&FixtureSummary>) -> String {
    let (students, companies, average) = match summary {
        Some(s) => (
            s.students.to_string(),
            s.companies.to_string(),
            s.average_marks
                .map(|avg| format!("{:.1}", avg))
                .unwrap_or_else(|| "—".to_string()),
        ),
        None => ("—".to_string(), "—".to_string(), "—".to_string()),
    };

    let content = format!(
        r#"<div class="main-title">Welcome to IntelliSQL!</div>
<div class="sub-title">Revolutionizing Database Querying with Advanced LLM Capabilities</div>
<div class="columns">
    <div>
        <div class="metric"><div class="label">Total Students</div><div class="value">{students}</div></div>
        <div class="metric"><div class="label">Companies</div><div class="value">{companies}</div></div>
        <div class="metric"><div class="label">Average Marks</div><div class="value">{average}</div></div>
    </div>
    <div class="notice info">
        <strong>✨ Our Features:</strong>
        <ul>
            <li>Natural Language Queries</li>
            <li>Instant SQL Generation</li>
            <li>Real-time Database Results</li>
            <li>Intelligent Query Assistance</li>
            <li>Performance Optimization</li>
        </ul>
    </div>
</div>"#
    );

    layout(Page::Home, model_label, &content)
}

/// About page.
pub fn render_about(model_label: &str) -> String {
    let content = format!(
        r#"<h1>About IntelliSQL</h1>
<p><strong>IntelliSQL</strong> is a cutting-edge platform designed to revolutionize the way users interact with SQL databases.</p>
<h3>🎯 Our Mission</h3>
<p>To democratize database access by enabling natural language interactions, making SQL querying accessible
to everyone regardless of their technical expertise.</p>
<h3>🔧 Technology Stack</h3>
<ul>
    <li><strong>Frontend:</strong> Server-rendered HTML (axum)</li>
    <li><strong>Backend:</strong> Rust, SQLite</li>
    <li><strong>AI Model:</strong> {model}</li>
</ul>
<h3>💡 How It Works</h3>
<ol>
    <li>You ask a question in English</li>
    <li>The model converts it to SQL</li>
    <li>SQL executes on database</li>
    <li>Results displayed instantly</li>
</ol>"#,
        model = escape_html(model_label)
    );

    layout(Page::About, model_label, &content)
}

/// Query Assistant page with the form, the outcome of the last submit and
/// the example questions.
pub fn render_query(model_label: &str, question: &str, outcome: &QueryOutcome) -> String {
    let mut content = format!(
        r#"<h1>🧠 Intelligent Query Assistant</h1>
<p>Ask questions in natural language and get SQL results instantly!</p>
<form method="post" action="/query">
    <label for="question">Your question:</label>
    <input type="text" id="question" name="question" value="{value}" placeholder="e.g., Who works at INFOSYS?">
    <button type="submit">Generate SQL &amp; Search</button>
</form>
"#,
        value = escape_html(question)
    );

    match outcome {
        QueryOutcome::Idle => {}
        QueryOutcome::Blank => {
            content.push_str("<div class=\"notice warning\">Please enter a question first.</div>\n");
        }
        QueryOutcome::Answered(answer) => {
            push_sql(&mut content, &answer.sql);
            content.push_str("<h3>📊 Results:</h3>\n");
            if answer.output.is_empty() {
                content.push_str(
                    "<div class=\"notice info\">No records found matching your query.</div>\n",
                );
            } else {
                let _ = writeln!(
                    content,
                    "<div class=\"notice success\">Found {} record(s)</div>",
                    answer.output.row_count()
                );
                push_table(&mut content, answer);
            }
        }
        QueryOutcome::Failed { sql, message } => {
            if let Some(sql) = sql {
                push_sql(&mut content, sql);
            }
            let _ = writeln!(
                content,
                "<div class=\"notice error\">❌ Error: {}</div>",
                escape_html(message)
            );
            content.push_str("<div class=\"notice info\">💡 Try rephrasing your question</div>\n");
        }
    }

    content.push_str("<details>\n<summary>💡 Try These Examples</summary>\n");
    for example in EXAMPLE_QUESTIONS {
        let _ = writeln!(content, "<pre>{}</pre>", escape_html(example));
    }
    content.push_str("</details>");

    layout(Page::Query, model_label, &content)
}

fn push_sql(content: &mut String, sql: &str) {
    let _ = writeln!(
        content,
        "<h3>📝 Generated SQL:</h3>\n<pre><code class=\"language-sql\">{}</code></pre>",
        escape_html(sql)
    );
}

fn push_table(content: &mut String, answer: &Answer) {
    content.push_str("<table>\n<thead><tr>");
    for column in &answer.output.columns {
        let _ = write!(content, "<th>{}</th>", escape_html(column));
    }
    content.push_str("</tr></thead>\n<tbody>\n");
    for row in &answer.output.rows {
        content.push_str("<tr>");
        for value in row {
            let _ = write!(content, "<td>{}</td>", escape_html(&value.to_string()));
        }
        content.push_str("</tr>\n");
    }
    content.push_str("</tbody>\n</table>\n");
}
