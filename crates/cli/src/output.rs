use crate::error::CliError;
use model::core::value::Value;
use serde::Serialize;

#[derive(Serialize)]
struct RenderedStatement<'a> {
    sql: &'a str,
    params: &'a [Value],
}

/// Formats rendered SQL for output. Plain SQL when there are no bound
/// parameters, otherwise a JSON document holding both.
fn format_rendered(sql: &str, params: &[Value]) -> Result<String, CliError> {
    if params.is_empty() {
        return Ok(sql.to_string());
    }
    serde_json::to_string_pretty(&RenderedStatement { sql, params }).map_err(CliError::JsonSerialize)
}

pub fn write_rendered(sql: &str, params: &[Value], path: String) -> Result<(), CliError> {
    let contents = format_rendered(sql, params)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn print_rendered(sql: &str, params: &[Value]) -> Result<(), CliError> {
    println!("{}", format_rendered(sql, params)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{format_rendered, write_rendered};
    use model::core::value::Value;
    use tempfile::tempdir;

    #[test]
    fn test_plain_sql_without_params() {
        let sql = r#"MERGE "t" ON "s" WHERE "s"."id"="t"."id""#;
        assert_eq!(format_rendered(sql, &[]).unwrap(), sql);
    }

    #[test]
    fn test_params_as_json() {
        let out = format_rendered("X=?", &[Value::Int(3)]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["sql"], "X=?");
        assert_eq!(parsed["params"][0]["Int"], 3);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.sql");
        write_rendered("SELECT 1", &[], path.to_string_lossy().to_string()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "SELECT 1");
    }
}
