// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! [`FlatProvider`] backed by a GitHub Projects (v2) board.

use serde_json::json;
use tracing::{debug, info, warn};

use fa_core::{ChildPage, FlatProvider, IssueRef, ParseContext, RawItem, RootFilter, WorkItem};

use crate::client::GraphQlClient;
use crate::error::Result;
use crate::queries;
use crate::response::{IssueData, ProjectItemsData, SubIssuesData};

/// Reads roots from an organization project and children from sub-issues.
pub struct GithubProvider {
    client: GraphQlClient,
    org: String,
    project: u64,
    ctx: ParseContext,
}

impl GithubProvider {
    pub fn new(client: GraphQlClient, org: impl Into<String>, project: u64, ctx: ParseContext) -> Self {
        GithubProvider {
            client,
            org: org.into(),
            project,
            ctx,
        }
    }

    /// Every issue on the project board, in board order.
    pub fn project_items(&self) -> Result<Vec<RawItem>> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let data: ProjectItemsData = self.client.execute(
                queries::PROJECT_ITEMS,
                json!({ "org": self.org, "project": self.project, "cursor": cursor }),
            )?;
            let connection = data.into_items()?;
            let next = connection.page_info.next_cursor()?;
            items.extend(connection.nodes.into_iter().flatten().filter_map(|n| n.into_raw()));
            debug!("Fetched {} project items so far", items.len());
            match next {
                Some(c) => cursor = Some(c),
                None => return Ok(items),
            }
        }
    }

    /// A single issue by URL, with its field values in this project.
    pub fn fetch_issue(&self, url: &str) -> Result<WorkItem> {
        let issue = IssueRef::parse(url)?;
        let data: IssueData = self.client.execute(
            queries::ISSUE,
            json!({ "owner": issue.owner, "repo": issue.repo, "number": issue.number }),
        )?;
        let raw = data.into_issue()?.into_raw_for_project(self.project);
        Ok(raw.resolve(&self.ctx)?)
    }

    fn sub_issues(&self, parent: &WorkItem, cursor: Option<&str>) -> Result<ChildPage> {
        let issue = IssueRef::parse(&parent.url)?;
        let data: SubIssuesData = self.client.execute(
            queries::SUB_ISSUES,
            json!({
                "owner": issue.owner,
                "repo": issue.repo,
                "number": issue.number,
                "cursor": cursor,
            }),
        )?;
        let connection = data.into_connection()?;
        let next_cursor = connection.page_info.next_cursor()?;
        let items = connection
            .nodes
            .into_iter()
            .flatten()
            .map(|node| node.into_raw_for_project(self.project))
            .collect();
        Ok(ChildPage { items, next_cursor })
    }
}

impl FlatProvider for GithubProvider {
    fn list_closed_roots(&self, filter: &RootFilter) -> fa_core::Result<Vec<WorkItem>> {
        info!("Fetching items of project {}/{}", self.org, self.project);
        let raw = self.project_items()?;
        let total = raw.len();

        let mut roots = Vec::new();
        for record in raw {
            let url = record.url.clone();
            match record.resolve(&self.ctx) {
                Ok(item) if filter.accepts(&item) => roots.push(item),
                Ok(_) => {}
                Err(e) => warn!("Skipping malformed project item {}: {}", url, e),
            }
        }
        info!("{} of {} project items are completed roots", roots.len(), total);
        Ok(roots)
    }

    fn fetch_children(&self, parent: &WorkItem, cursor: Option<&str>) -> fa_core::Result<ChildPage> {
        debug!("Fetching sub-issues of {} (cursor {:?})", parent.url, cursor);
        Ok(self.sub_issues(parent, cursor)?)
    }
}
