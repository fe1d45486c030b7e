//! End-to-end tests: parse real Lua source, lint it with the built-in
//! rules, and check the findings.

use lua_lint_core::{Config, FindingSet, Linter, Severity};
use lua_lint_parser::parse_source;
use lua_lint_rules::{default_rules, rules_from_config};

fn lint(source: &str) -> FindingSet {
    let block = parse_source(source).unwrap();
    Linter::builder()
        .rules(default_rules())
        .build()
        .lint(&block)
        .unwrap()
}

fn lint_with_config(source: &str, config_toml: &str) -> FindingSet {
    let block = parse_source(source).unwrap();
    let config = Config::parse(config_toml).unwrap();
    let rules = rules_from_config(&config).unwrap();
    Linter::builder()
        .rules(rules)
        .config(config)
        .build()
        .lint(&block)
        .unwrap()
}

#[test]
fn camel_case_local_is_flagged() {
    let findings = lint("local myVar = 1");
    assert_eq!(findings.len(), 1);
    let finding = findings.iter().next().unwrap();
    assert_eq!(finding.code, "LL001");
    assert_eq!(finding.line, 1);
    assert_eq!(finding.to_string(), "1: myVar is invalid local var name");
}

#[test]
fn snake_case_local_is_clean() {
    assert!(lint("local my_var = 1").is_empty());
}

#[test]
fn function_valued_local_skips_the_naming_check() {
    // `helper` would fail lowerCamelCase checks elsewhere, but a local bound
    // to a function value is exempt from the local naming rule by default.
    assert!(lint("local doWork = function() end").is_empty());
    assert!(lint("local function doWork() end").is_empty());
}

#[test]
fn upper_snake_global_passes_naming_but_trips_the_global_ban() {
    let findings = lint("TOTAL = 1");
    let codes: Vec<&str> = findings.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, vec!["LL004"]);
    assert_eq!(
        findings.iter().next().unwrap().to_string(),
        "1: TOTAL is invalid global var"
    );
}

#[test]
fn lowercase_global_trips_naming_and_the_global_ban() {
    let findings = lint("total = 1");
    let codes: Vec<&str> = findings.iter().map(|f| f.code.as_str()).collect();
    assert_eq!(codes, vec!["LL002", "LL004"]);
    assert_eq!(
        findings.iter().next().unwrap().message,
        "total is invalid global var name"
    );
}

#[test]
fn bad_function_name_is_one_finding_and_body_is_still_walked() {
    let source = "\
function DoThing()
  local badName = 1
end
";
    let findings = lint(source);
    let summary: Vec<(&str, usize)> = findings.iter().map(|f| (f.code.as_str(), f.line)).collect();
    assert_eq!(summary, vec![("LL003", 1), ("LL001", 2)]);
    assert_eq!(
        findings.iter().next().unwrap().message,
        "DoThing is invalid func name"
    );
}

#[test]
fn func_name_rule_reports_at_most_once_per_definition() {
    // A name violating the pattern in more than one way still yields a
    // single finding.
    let findings = lint("function BAD_NAME() end");
    let ll003: Vec<&lua_lint_core::Finding> =
        findings.iter().filter(|f| f.code == "LL003").collect();
    assert_eq!(ll003.len(), 1);
}

#[test]
fn while_body_findings_carry_inner_line_numbers() {
    let source = "\
local ok = 1
while true do
  local innerBad = 2
end
";
    let findings = lint(source);
    assert_eq!(findings.len(), 1);
    let finding = findings.iter().next().unwrap();
    assert_eq!(finding.line, 3);
    assert_eq!(finding.code, "LL001");
}

#[test]
fn all_block_bearing_statements_are_descended() {
    let source = "\
do
  local A = 1
end
while true do
  local B = 2
end
repeat
  local C = 3
until true
for i = 1, 3 do
  local D = 4
end
for k, v in pairs(t) do
  local E = 5
end
";
    let findings = lint(source);
    let lines: Vec<usize> = findings
        .iter()
        .filter(|f| f.code == "LL001")
        .map(|f| f.line)
        .collect();
    assert_eq!(lines, vec![2, 5, 8, 11, 14]);
}

#[test]
fn if_branches_are_not_descended() {
    let source = "\
if cond then
  local BadInThen = 1
else
  local BadInElse = 2
end
";
    assert!(lint(source).is_empty());
}

#[test]
fn function_definition_body_is_descended() {
    let source = "\
function run()
  local Bad = 1
end
";
    let findings = lint(source);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings.iter().next().unwrap().line, 2);
}

#[test]
fn dotted_and_method_function_names_are_not_checked() {
    assert!(lint("function M.DoThing() end").is_empty());
    assert!(lint("function obj:DoThing() end").is_empty());
}

#[test]
fn indexed_assignment_is_not_a_global_write() {
    assert!(lint("local t = {}\nt.field = 1\nt[1] = 2").is_empty());
}

#[test]
fn findings_concatenate_in_source_order() {
    let source = "\
local firstBad = 1
local ok = 2
second_bad_global = 3
";
    let findings = lint(source);
    let lines: Vec<usize> = findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![1, 3, 3]);
}

#[test]
fn linting_the_same_tree_twice_gives_identical_findings() {
    let block = parse_source("local Bad = 1\nwhile true do Worse = 2 end").unwrap();
    let linter = Linter::builder().rules(default_rules()).build();
    let first = linter.lint(&block).unwrap();
    let second = linter.lint(&block).unwrap();
    assert_eq!(first, second);
}

#[test]
fn whitelist_exempts_globals_from_the_ban() {
    let findings = lint_with_config(
        "VERSION = \"1.0\"\nOTHER = 2",
        "[rules.no-global-var]\nwhitelist = [\"^VERSION$\"]\n",
    );
    let summary: Vec<(&str, usize)> = findings.iter().map(|f| (f.code.as_str(), f.line)).collect();
    assert_eq!(summary, vec![("LL004", 2)]);
}

#[test]
fn custom_pattern_changes_what_is_flagged() {
    // A kebab-friendly team pattern: anything starting with `m_`.
    let findings = lint_with_config(
        "local m_count = 1\nlocal other = 2",
        "[rules.local-var-name]\npattern = \"^m_[a-z0-9_]*$\"\n",
    );
    let lines: Vec<usize> = findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![2]);
}

#[test]
fn disabled_rule_produces_no_findings() {
    let findings = lint_with_config(
        "TOTAL = 1",
        "[rules.no-global-var]\nenabled = false\n",
    );
    assert!(findings.is_empty());
}

#[test]
fn severity_override_downgrades_to_warning() {
    let findings = lint_with_config(
        "TOTAL = 1",
        "[rules.no-global-var]\nseverity = \"warning\"\n",
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings.iter().next().unwrap().severity, Severity::Warning);
}

#[test]
fn clean_source_yields_an_empty_set() {
    let source = "\
local state = { count = 0 }
local function bump()
  state.count = state.count + 1
end
for i = 1, 10 do
  bump()
end
return state.count
";
    assert!(lint(source).is_empty());
}
