// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! natctl subcommands

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use models::network::{NatRuleCreateModel, NatRuleResponseModel, NatRuleTable};
use models::{Validate, stringify};

use crate::args::ListArgs;
use crate::load::{NatctlError, load_file};

fn io_error(path: &Path, e: std::io::Error) -> NatctlError {
    NatctlError::Io(path.to_owned(), e)
}

/// Validate every rule of every file, reporting each result.
/// Fails if any file cannot be read or any rule is invalid.
pub fn validate(files: &[PathBuf], out: &mut impl Write) -> Result<(), NatctlError> {
    let stdout = Path::new("<stdout>");
    let mut total = 0;
    let mut failed = 0;
    for file in files {
        let rules: Vec<NatRuleCreateModel> = load_file(file)?;
        for rule in &rules {
            let result = rule.validate();
            if result.is_err() {
                warn!("Rule '{}' in {} is invalid", rule.base.name, file.display());
                failed += 1;
            }
            total += 1;
            writeln!(
                out,
                "{}: {}: {}",
                file.display(),
                rule.base.name,
                stringify(&result)
            )
            .map_err(|e| io_error(stdout, e))?;
        }
    }
    info!("Validated {total} rules, {failed} failed");
    if failed > 0 {
        return Err(NatctlError::ValidationFailed(failed, total));
    }
    Ok(())
}

/// Load a document of API responses into a table and print the rules that pass the filters
pub fn list(args: &ListArgs, out: &mut impl Write) -> Result<(), NatctlError> {
    let stdout = Path::new("<stdout>");
    let rules: Vec<NatRuleResponseModel> = load_file(&args.file)?;
    let mut table = NatRuleTable::new();
    for rule in rules {
        table.insert(args.rulebase, rule)?;
    }
    let filter = args.filter();
    let scope = args.scope()?;
    let kept = table.list(args.rulebase, &filter, scope.as_ref());
    for rule in &kept {
        write!(out, "{rule}").map_err(|e| io_error(stdout, e))?;
    }
    info!(
        "Listed {} of {} rules in {} rulebase",
        kept.len(),
        table.len(),
        args.rulebase
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use models::network::{NatRulebase, NatType};
    use std::fs;
    use tempfile::TempDir;

    // Writes a document under a temporary directory, removed when the `TempDir` drops
    fn document(name: &str, text: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        (dir, path)
    }

    const RESPONSES: &str = r#"[
        {"id": "11111111-1111-4111-8111-111111111111", "name": "a", "folder": "Texas",
         "tag": ["Automation"]},
        {"id": "22222222-2222-4222-8222-222222222222", "name": "b", "folder": "All",
         "nat_type": "nat64"},
        {"id": "33333333-3333-4333-8333-333333333333", "name": "c", "snippet": "web",
         "disabled": true}
    ]"#;

    #[test]
    fn validate_reports_each_rule() {
        let (_good_dir, good) = document("good.yaml", "- name: ok\n  folder: Texas\n");
        let (_bad_dir, bad) = document(
            "bad.json",
            r#"[{"name": "no-container"}, {"name": "fine", "device": "fw-1"}]"#,
        );

        let mut out = Vec::new();
        validate(std::slice::from_ref(&good), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("good.yaml: ok: Ok\n"));

        let mut out = Vec::new();
        let err = validate(&[good, bad], &mut out).unwrap_err();
        assert!(matches!(err, NatctlError::ValidationFailed(1, 3)));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(
            "no-container: FAILED: Exactly one of 'folder', 'snippet', or 'device' must be provided"
        ));
        assert!(text.contains("bad.json: fine: Ok"));
    }

    #[test]
    fn list_applies_filters() {
        let (_dir, file) = document("responses.json", RESPONSES);
        let mut args = ListArgs {
            file,
            ..ListArgs::default()
        };

        let mut out = Vec::new();
        list(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a [ipv4] folder Texas"));
        assert!(text.contains("b [nat64] folder All"));
        assert!(text.contains("c [ipv4] (disabled) snippet web"));

        args.nat_type = vec![NatType::Ipv4];
        args.exclude_snippets = vec!["web".to_owned()];
        let mut out = Vec::new();
        list(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a [ipv4]"));
        assert!(!text.contains("b [nat64]"));
        assert!(!text.contains("c [ipv4]"));

        // the document is loaded into the requested rulebase
        args.rulebase = NatRulebase::Post;
        args.tag = vec!["Automation".to_owned()];
        let mut out = Vec::new();
        list(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a [ipv4]"));
    }

    #[test]
    fn list_rejects_duplicate_names() {
        let (_dir, file) = document(
            "dups.yaml",
            "- {id: 11111111-1111-4111-8111-111111111111, name: a, folder: Texas}\n\
             - {id: 22222222-2222-4222-8222-222222222222, name: a, folder: Texas}\n",
        );
        let args = ListArgs {
            file,
            ..ListArgs::default()
        };
        let err = list(&args, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "A NAT rule with name 'a' already exists in this container");
    }
}
