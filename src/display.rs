use textwrap::{wrap, Options as TextWrapOptions};

use crate::constants::YEAR_PARAM;
use crate::models::PullRequest;

const OUTPUT_WIDTH: usize = 80;

fn wrapped_text(text: &str, indent: usize, width: usize) -> String {
    let indent_str = " ".repeat(indent);
    let options = TextWrapOptions::new(width.saturating_sub(indent).max(1))
        .subsequent_indent(&indent_str);

    wrap(text, options)
        .into_iter()
        .map(|line| format!("{}{}\n", indent_str, line))
        .collect()
}

pub fn format_parameter_list(license_key: &str, params: &[String]) -> String {
    let mut out = format!("\n--- Parameters for {} ---\n", license_key);

    if params.is_empty() {
        out.push_str("  (No parameters required; the license can be submitted as is)\n");

        return out;
    }

    for param in params {
        let default_info = if param == YEAR_PARAM {
            " (defaults to current year if not provided)"
        } else {
            ""
        };
        out.push_str(&format!("  - {}\n", param));
        out.push_str(&wrapped_text(
            &format!("Argument: --param {}=VALUE{}", param, default_info),
            4,
            OUTPUT_WIDTH,
        ));
    }

    out
}

pub fn format_pull_request(org_repo: &str, pull_request: &PullRequest) -> String {
    format!(
        "  {:<30} {} {}",
        org_repo,
        pull_request.link_text(),
        pull_request.html_url
    )
}

pub fn print_parameter_list(license_key: &str, params: &[String]) {
    print!("{}", format_parameter_list(license_key, params));
}

pub fn print_pull_request(org_repo: &str, pull_request: &PullRequest) {
    println!("{}", format_pull_request(org_repo, pull_request));
}
