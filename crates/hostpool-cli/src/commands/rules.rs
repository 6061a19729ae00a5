use std::fmt::Write as _;

use hostpool_autoscale::{ListedRule, RuleRepository};
use hostpool_state::{AutoScaleRule, RuleStore};

pub fn list<S: RuleStore>(repo: &RuleRepository<S>, format: &str) -> anyhow::Result<()> {
    let rules = repo.list()?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rules)?),
        "text" => print!("{}", render_table(&rules)),
        other => anyhow::bail!("unknown output format: {other} (expected text or json)"),
    }
    Ok(())
}

pub fn get<S: RuleStore>(repo: &RuleRepository<S>, filter: &str) -> anyhow::Result<()> {
    let rule = repo.get(filter)?;
    println!("{}", serde_json::to_string_pretty(&rule)?);
    Ok(())
}

pub fn set<S: RuleStore>(repo: &RuleRepository<S>, rule: AutoScaleRule) -> anyhow::Result<()> {
    let stored = repo.update(rule)?;
    println!("✓ Rule saved for {}", display_filter(&stored.metadata_filter));
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}

pub fn delete<S: RuleStore>(repo: &RuleRepository<S>, filter: &str) -> anyhow::Result<()> {
    repo.delete(filter)?;
    println!("✓ Rule deleted for {}", display_filter(filter));
    Ok(())
}

/// The empty filter selects every host.
fn display_filter(filter: &str) -> &str {
    if filter.is_empty() { "<all hosts>" } else { filter }
}

fn render_table(rules: &[ListedRule]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:>8} {:>8} {:>10} {:<7} {:<9} ERROR",
        "FILTER", "MAX CONT", "MAX MEM", "SCALE DOWN", "ENABLED", "REBALANCE"
    );
    for listed in rules {
        let rule = &listed.rule;
        let _ = writeln!(
            out,
            "{:<24} {:>8} {:>8.3} {:>10.3} {:<7} {:<9} {}",
            display_filter(&rule.metadata_filter),
            rule.max_container_count,
            rule.max_memory_ratio,
            rule.scale_down_ratio,
            if rule.enabled { "yes" } else { "no" },
            if rule.prevent_rebalance { "prevented" } else { "allowed" },
            listed.error.as_deref().unwrap_or("-"),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_header_and_one_row_per_rule() {
        let rules = vec![
            ListedRule {
                rule: AutoScaleRule {
                    metadata_filter: String::new(),
                    enabled: true,
                    scale_down_ratio: 1.333,
                    ..AutoScaleRule::default()
                },
                error: Some("invalid rule".to_string()),
            },
            ListedRule {
                rule: AutoScaleRule {
                    metadata_filter: "pool=a".to_string(),
                    max_container_count: 5,
                    scale_down_ratio: 1.5,
                    prevent_rebalance: true,
                    ..AutoScaleRule::default()
                },
                error: None,
            },
        ];

        let table = render_table(&rules);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("FILTER"));
        assert!(lines[1].starts_with("<all hosts>"));
        assert!(lines[1].ends_with("invalid rule"));
        assert!(lines[2].starts_with("pool=a"));
        assert!(lines[2].contains("1.500"));
        assert!(lines[2].contains("prevented"));
        assert!(lines[2].ends_with('-'));
    }
}
