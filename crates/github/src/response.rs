// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deserialization shapes for GraphQL responses.
//!
//! These mirror the queries in [`crate::queries`] and are converted into
//! [`RawItem`] records as soon as they arrive.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use fa_core::{FieldEntry, FieldValue, RawItem};

use crate::error::{Error, Result};

/// The top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> Envelope<T> {
    /// The data payload, or the reported errors joined together.
    pub fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GraphQl(messages.join("; ")));
        }
        self.data.ok_or(Error::MissingData("data"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor of the next page, `None` on the last page.
    pub fn next_cursor(&self) -> Result<Option<String>> {
        if !self.has_next_page {
            return Ok(None);
        }
        self.end_cursor
            .clone()
            .map(Some)
            .ok_or(Error::MissingData("pageInfo.endCursor"))
    }
}

/// Treats an explicit `null` like a missing value.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

impl<T> Nodes<T> {
    fn into_items(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten()
    }
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Nodes { nodes: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
pub struct Actor {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ParentNode {
    pub id: String,
}

/// Field name as reported through `ProjectV2FieldCommon`.
#[derive(Debug, Default, Deserialize)]
pub struct FieldName {
    pub name: Option<String>,
}

/// One custom field value; the shape depends on the field type.
#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum FieldValueNode {
    #[serde(rename = "ProjectV2ItemFieldNumberValue")]
    Number {
        #[serde(default)]
        field: FieldName,
        number: Option<f64>,
    },
    #[serde(rename = "ProjectV2ItemFieldTextValue")]
    Text {
        #[serde(default)]
        field: FieldName,
        text: Option<String>,
    },
    #[serde(rename = "ProjectV2ItemFieldDateValue")]
    Date {
        #[serde(default)]
        field: FieldName,
        date: Option<String>,
    },
    #[serde(rename = "ProjectV2ItemFieldSingleSelectValue")]
    SingleSelect {
        #[serde(default)]
        field: FieldName,
        name: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl FieldValueNode {
    /// Resolves into a named entry. Values without a field name or payload
    /// are dropped.
    pub fn into_entry(self) -> Option<FieldEntry> {
        let (field, value) = match self {
            FieldValueNode::Number { field, number } => (field, FieldValue::Number(number?)),
            FieldValueNode::Text { field, text } => (field, FieldValue::Text(text?)),
            FieldValueNode::Date { field, date } => {
                let raw = date?;
                match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                    Ok(d) => (field, FieldValue::Date(d)),
                    Err(_) => {
                        debug!("Ignoring unparseable date field value '{}'", raw);
                        return None;
                    }
                }
            }
            FieldValueNode::SingleSelect { field, name } => (field, FieldValue::SingleSelect(name?)),
            FieldValueNode::Unsupported => return None,
        };
        Some(FieldEntry::new(field.name?, value))
    }
}

fn field_entries(values: Nodes<FieldValueNode>) -> Vec<FieldEntry> {
    values.into_items().filter_map(FieldValueNode::into_entry).collect()
}

#[derive(Debug, Deserialize)]
pub struct ProjectRef {
    pub number: u64,
}

/// Membership of an issue in a project, with that project's field values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItemRef {
    pub project: Option<ProjectRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub field_values: Nodes<FieldValueNode>,
}

/// An issue as selected by the `IssueFields` fragment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub id: Option<String>,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub state_reason: Option<String>,
    pub url: String,
    pub created_at: String,
    pub closed_at: Option<String>,
    pub author: Option<Actor>,
    #[serde(default, deserialize_with = "nullable")]
    pub labels: Nodes<Label>,
    #[serde(default, deserialize_with = "nullable")]
    pub assignees: Nodes<Actor>,
    pub parent: Option<ParentNode>,
    #[serde(default, deserialize_with = "nullable")]
    pub project_items: Nodes<ProjectItemRef>,
}

impl IssueNode {
    /// Converts into a raw record carrying `fields`.
    pub fn into_raw(self, fields: Vec<FieldEntry>) -> RawItem {
        RawItem {
            url: self.url,
            title: self.title,
            author: self.author.map(|a| a.login),
            assignees: self.assignees.into_items().map(|a| a.login).collect(),
            labels: self.labels.into_items().map(|l| l.name).collect(),
            state: self.state,
            state_reason: self.state_reason,
            created_at: self.created_at,
            closed_at: self.closed_at,
            parent_id: self.parent.map(|p| p.id),
            fields,
        }
    }

    /// Converts using the field values this issue has in `project`.
    ///
    /// Falls back to the values of every project the issue belongs to when
    /// it is not an item of `project`.
    pub fn into_raw_for_project(mut self, project: u64) -> RawItem {
        let items: Vec<ProjectItemRef> = std::mem::take(&mut self.project_items).into_items().collect();
        let in_project = items
            .iter()
            .any(|i| i.project.as_ref().is_some_and(|p| p.number == project));
        let fields = items
            .into_iter()
            .filter(|i| !in_project || i.project.as_ref().is_some_and(|p| p.number == project))
            .flat_map(|i| field_entries(i.field_values))
            .collect();
        self.into_raw(fields)
    }
}

/// Content of a project item. Draft issues and pull requests are skipped.
#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum ItemContent {
    Issue(IssueNode),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub content: Option<ItemContent>,
    #[serde(default, deserialize_with = "nullable")]
    pub field_values: Nodes<FieldValueNode>,
}

impl ProjectItem {
    /// The issue carried by this item, with the item's field values.
    pub fn into_raw(self) -> Option<RawItem> {
        match self.content? {
            ItemContent::Issue(issue) => Some(issue.into_raw(field_entries(self.field_values))),
            ItemContent::Other => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConnection {
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<ProjectItem>>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectV2 {
    pub items: ItemConnection,
}

#[derive(Debug, Deserialize)]
pub struct Organization {
    #[serde(rename = "projectV2")]
    pub project_v2: Option<ProjectV2>,
}

/// Response to [`crate::queries::PROJECT_ITEMS`].
#[derive(Debug, Deserialize)]
pub struct ProjectItemsData {
    pub organization: Option<Organization>,
}

impl ProjectItemsData {
    pub fn into_items(self) -> Result<ItemConnection> {
        self.organization
            .ok_or(Error::MissingData("organization"))?
            .project_v2
            .ok_or(Error::MissingData("organization.projectV2"))
            .map(|p| p.items)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubIssueConnection {
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<IssueNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueWithSubIssues {
    pub sub_issues: SubIssueConnection,
}

#[derive(Debug, Deserialize)]
pub struct SubIssueRepository {
    pub issue: Option<IssueWithSubIssues>,
}

/// Response to [`crate::queries::SUB_ISSUES`].
#[derive(Debug, Deserialize)]
pub struct SubIssuesData {
    pub repository: Option<SubIssueRepository>,
}

impl SubIssuesData {
    pub fn into_connection(self) -> Result<SubIssueConnection> {
        self.repository
            .ok_or(Error::MissingData("repository"))?
            .issue
            .ok_or(Error::MissingData("repository.issue"))
            .map(|i| i.sub_issues)
    }
}

#[derive(Debug, Deserialize)]
pub struct IssueRepository {
    pub issue: Option<IssueNode>,
}

/// Response to [`crate::queries::ISSUE`].
#[derive(Debug, Deserialize)]
pub struct IssueData {
    pub repository: Option<IssueRepository>,
}

impl IssueData {
    pub fn into_issue(self) -> Result<IssueNode> {
        self.repository
            .ok_or(Error::MissingData("repository"))?
            .issue
            .ok_or(Error::MissingData("repository.issue"))
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
