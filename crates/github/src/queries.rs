// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GraphQL documents sent to the GitHub API.

/// Fields requested for every issue, whichever query it comes from.
macro_rules! issue_fragment {
    () => {
        r#"
fragment IssueFields on Issue {
  id
  number
  title
  state
  stateReason
  url
  createdAt
  closedAt
  author { login }
  labels(first: 100) { nodes { name } }
  assignees(first: 10) { nodes { login } }
  parent { id }
}

fragment FieldValues on ProjectV2ItemFieldValueConnection {
  nodes {
    __typename
    ... on ProjectV2ItemFieldNumberValue {
      number
      field { ... on ProjectV2FieldCommon { name } }
    }
    ... on ProjectV2ItemFieldTextValue {
      text
      field { ... on ProjectV2FieldCommon { name } }
    }
    ... on ProjectV2ItemFieldDateValue {
      date
      field { ... on ProjectV2FieldCommon { name } }
    }
    ... on ProjectV2ItemFieldSingleSelectValue {
      name
      field { ... on ProjectV2FieldCommon { name } }
    }
  }
}
"#
    };
}

/// One page of a project's items with their custom field values.
pub const PROJECT_ITEMS: &str = concat!(
    r#"
query ProjectItems($org: String!, $project: Int!, $cursor: String) {
  organization(login: $org) {
    projectV2(number: $project) {
      items(first: 100, after: $cursor) {
        pageInfo { hasNextPage endCursor }
        nodes {
          content {
            __typename
            ... on Issue { ...IssueFields }
          }
          fieldValues(first: 100) { ...FieldValues }
        }
      }
    }
  }
}
"#,
    issue_fragment!()
);

/// One page of an issue's sub-issues. Field values come from the
/// sub-issue's own project items.
pub const SUB_ISSUES: &str = concat!(
    r#"
query SubIssues($owner: String!, $repo: String!, $number: Int!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    issue(number: $number) {
      subIssues(first: 100, after: $cursor) {
        pageInfo { hasNextPage endCursor }
        nodes {
          ...IssueFields
          projectItems(first: 10) {
            nodes {
              project { number }
              fieldValues(first: 50) { ...FieldValues }
            }
          }
        }
      }
    }
  }
}
"#,
    issue_fragment!()
);

/// A single issue, used as the root of an ad-hoc tree.
pub const ISSUE: &str = concat!(
    r#"
query Issue($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    issue(number: $number) {
      ...IssueFields
      projectItems(first: 10) {
        nodes {
          project { number }
          fieldValues(first: 50) { ...FieldValues }
        }
      }
    }
  }
}
"#,
    issue_fragment!()
);
