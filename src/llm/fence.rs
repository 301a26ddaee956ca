//! Markdown code-fence removal for model output.

/// Fence openers removed before the bare ```` ``` ```` marker.
const FENCE_OPENERS: [&str; 2] = ["```sql", "```SQL"];

/// Strip markdown code fences from model output.
///
/// Handles:
/// - ```sql ... ```
/// - ```SQL ... ```
/// - ``` ... ```
///
/// Every fence marker is removed wherever it appears, then surrounding
/// whitespace is trimmed. Text without fences only loses its surrounding
/// whitespace.
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = text.to_string();
    for opener in FENCE_OPENERS {
        cleaned = cleaned.replace(opener, "");
    }
    cleaned.replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_sql_fence() {
        let raw = "```sql\nSELECT COUNT(*) FROM STUDENTS;\n```";
        assert_eq!(strip_code_fences(raw), "SELECT COUNT(*) FROM STUDENTS;");
    }

    #[test]
    fn test_strip_bare_fence() {
        let raw = "```\nSELECT AVG(marks) FROM STUDENTS;\n```\n";
        assert_eq!(strip_code_fences(raw), "SELECT AVG(marks) FROM STUDENTS;");
    }

    #[test]
    fn test_strip_uppercase_fence() {
        let raw = "  ```SQL SELECT * FROM STUDENTS WHERE company='INFOSYS'; ```  ";
        assert_eq!(
            strip_code_fences(raw),
            "SELECT * FROM STUDENTS WHERE company='INFOSYS';"
        );
    }

    #[test]
    fn test_no_fence_unchanged() {
        let sql = "SELECT * FROM STUDENTS ORDER BY marks DESC LIMIT 1;";
        assert_eq!(strip_code_fences(sql), sql);
        assert_eq!(strip_code_fences(&format!("\n {} \n", sql)), sql);
    }
}
