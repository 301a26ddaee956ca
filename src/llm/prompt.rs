//! Fixed instruction prompt for the `STUDENTS` schema.

/// Instruction block sent ahead of every question.
pub const SYSTEM_PROMPT: &str = r#"
You are an expert in converting English questions to SQL query!
The SQL database has the name STUDENTS and has the following columns - name, class, marks, company.

Examples:
- "How many students?" → SELECT COUNT(*) FROM STUDENTS;
- "Show INFOSYS employees" → SELECT * FROM STUDENTS WHERE company='INFOSYS';
- "Highest marks?" → SELECT * FROM STUDENTS ORDER BY marks DESC LIMIT 1;
- "Average marks?" → SELECT AVG(marks) FROM STUDENTS;

Rules:
- Only output the SQL query
- No explanation, no markdown, just the query
- Use single quotes for text values
"#;

/// Suggestions shown under the query form.
pub const EXAMPLE_QUESTIONS: [&str; 5] = [
    "Show all students",
    "Who works at INFOSYS?",
    "What is the average marks?",
    "Which student scored highest?",
    "List students in BTech class",
];
