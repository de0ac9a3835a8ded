// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use fa_core::{summarize, Family, FamilyBuilder, FlatProvider, IssueRef, MaxDepth, ParseContext, WorkItem};
use fa_github::{GithubProvider, GraphQlClient};

use crate::cli::TreeArgs;
use crate::display::render_family;
use crate::error::Result;

pub fn run(config_path: Option<&Path>, args: &TreeArgs) -> Result<()> {
    // Reject a bad URL before asking for a token.
    let issue = IssueRef::parse(&args.url)?;
    let settings = super::load_settings(config_path, args.settings())?;
    let config = settings.resolve_tree()?;

    let client = GraphQlClient::new(config.endpoint, config.token)?;
    let provider = GithubProvider::new(client, issue.owner, config.project, config.ctx.clone());

    let root = crate::time_phase!("tree::root", { provider.fetch_issue(&args.url)? });
    let family = build_tree(&provider, root, config.max_depth, config.ctx);
    let summary = summarize(&family);
    println!("{}", render_family(&family, &summary, args.format)?);
    Ok(())
}

/// Builds one family without any root filtering.
pub(crate) fn build_tree<P: FlatProvider>(
    provider: P,
    root: WorkItem,
    max_depth: MaxDepth,
    ctx: ParseContext,
) -> Family {
    let builder = FamilyBuilder::new(provider, max_depth, ctx);
    crate::time_phase!("tree::build", { builder.build(root) })
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
