//! # Templates Module
//!
//! This module holds the built-in banner templates and renders them with the
//! per-file data (dates, file name, year).
//!
//! The module includes:
//! - [`TemplateManager`] for selecting and rendering a banner template
//! - [`BannerData`] for providing data to fill in templates
//! - [`BannerTemplate`] describing one built-in template
//!
//! Author and email are baked into the template text when the manager is
//! created; only the placeholders below are substituted per file:
//!
//! | Placeholder            | Value                                   |
//! |------------------------|-----------------------------------------|
//! | `{{createdDate}}`      | date of the commit that added the file  |
//! | `{{lastModifiedDate}}` | date of the latest commit on the file   |
//! | `{{filename}}`         | base name of the file                   |
//! | `{{year}}`             | four-digit year of `{{createdDate}}`    |
//!
//! ## Example
//!
//! ```rust
//! use copyright_updater::templates::{BannerData, TemplateManager};
//!
//! # fn main() -> anyhow::Result<()> {
//! let manager = TemplateManager::new("Leon", "leon@example.com", 0);
//!
//! let banner = manager.render(&BannerData {
//!   created_date: "2023-04-01 10:00:00".to_string(),
//!   last_modified_date: "2024-01-02 12:30:00".to_string(),
//!   filename: "app.ts".to_string(),
//!   year: "2023".to_string(),
//! })?;
//!
//! assert!(banner.starts_with("/**\n * Created by Leon<leon@example.com> at 2023-04-01 10:00:00."));
//! # Ok(())
//! # }
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::warn;


pub const CREATED_DATE: &str = "{{createdDate}}";
pub const LAST_MODIFIED_DATE: &str = "{{lastModifiedDate}}";
pub const FILENAME: &str = "{{filename}}";
pub const YEAR: &str = "{{year}}";

const PLACEHOLDERS: [&str; 4] = [CREATED_DATE, LAST_MODIFIED_DATE, FILENAME, YEAR];

/// Errors produced while rendering a banner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
  /// A placeholder survived substitution (e.g. it appeared twice in the template).
  #[error("placeholder {0} is still present after rendering")]
  UnresolvedPlaceholder(&'static str),
}

/// Data used to fill out a banner template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerData {
  /// `YYYY-MM-DD HH:MM:SS` of the commit that added the file
  pub created_date: String,
  /// `YYYY-MM-DD HH:MM:SS` of the latest commit touching the file
  pub last_modified_date: String,
  /// Base name of the file
  pub filename: String,
  /// Four-digit year of `created_date`
  pub year: String,
}

impl BannerData {
  fn value_for(&self, placeholder: &str) -> &str {
    match placeholder {
      CREATED_DATE => &self.created_date,
      LAST_MODIFIED_DATE => &self.last_modified_date,
      FILENAME => &self.filename,
      _ => &self.year,
    }
  }
}

/// One built-in banner template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerTemplate {
  /// Short name shown by `--list-templates`
  pub name: &'static str,
  /// Template text with author and email already filled in
  pub text: String,
}

/// Builds the ordered list of built-in templates for an author and email.
///
/// Every template ends with a blank line so the file body starts on its own
/// line after the closing `*/`.
pub fn builtin_templates(author: &str, email: &str) -> Vec<BannerTemplate> {
  vec![
    BannerTemplate {
      name: "minimal",
      text: format!(
        "/**\n * Created by {author}<{email}> at {CREATED_DATE}.\n * Last modified at {LAST_MODIFIED_DATE}\n */\n\n"
      ),
    },
    BannerTemplate {
      name: "structured",
      text: format!(
        "/**\n * @file {FILENAME}\n * @description\n * @created {CREATED_DATE}\n * @lastModified {LAST_MODIFIED_DATE}\n * @author {author}\n * @email {email}\n * @copyright Copyright (c) {YEAR}\n */\n\n"
      ),
    },
  ]
}

/// Manager for selecting and rendering a banner template.
///
/// The template is chosen once at construction; an index outside the
/// built-in list falls back to the first template.
pub struct TemplateManager {
  templates: Vec<BannerTemplate>,
  selected: usize,
}

impl TemplateManager {
  /// Creates a manager with author and email baked into the built-in
  /// templates and `index` selected.
  pub fn new(author: &str, email: &str, index: usize) -> Self {
    let templates = builtin_templates(author, email);
    let selected = if index < templates.len() { index } else { 0 };
    if selected != index {
      warn!("Template index {index} is out of range, using template 0");
    }

    Self { templates, selected }
  }

  /// All built-in templates in selection order.
  pub fn templates(&self) -> &[BannerTemplate] {
    &self.templates
  }

  /// Number of built-in templates.
  pub fn template_count(&self) -> usize {
    self.templates.len()
  }

  /// Index of the template that [`render`](Self::render) uses.
  pub const fn selected_index(&self) -> usize {
    self.selected
  }

  /// The template that [`render`](Self::render) uses.
  pub fn selected(&self) -> &BannerTemplate {
    &self.templates[self.selected]
  }

  /// Renders the selected template with the given data.
  ///
  /// Each placeholder is replaced at its first occurrence only. Templates
  /// that omit a placeholder simply ignore the corresponding value.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError::UnresolvedPlaceholder`] if the template repeats a
  /// placeholder, since the repeat would reach the file unsubstituted.
  pub fn render(&self, data: &BannerData) -> Result<String, TemplateError> {
    static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
      Regex::new(r"\{\{(createdDate|lastModifiedDate|filename|year)\}\}").expect("placeholder regex must compile")
    });

    let template = &self.selected().text;
    let mut rendered = String::with_capacity(template.len() + 64);
    let mut seen: Vec<&'static str> = Vec::with_capacity(PLACEHOLDERS.len());
    let mut last_end = 0;

    // Substitution happens on template positions only, so a value that
    // happens to contain a token is never re-expanded.
    for found in PLACEHOLDER_REGEX.find_iter(template) {
      let Some(placeholder) = PLACEHOLDERS.into_iter().find(|p| *p == found.as_str()) else {
        continue;
      };
      if seen.contains(&placeholder) {
        return Err(TemplateError::UnresolvedPlaceholder(placeholder));
      }
      seen.push(placeholder);

      rendered.push_str(&template[last_end..found.start()]);
      rendered.push_str(data.value_for(placeholder));
      last_end = found.end();
    }
    rendered.push_str(&template[last_end..]);

    Ok(rendered)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn data() -> BannerData {
    BannerData {
      created_date: "2023-04-01 10:00:00".to_string(),
      last_modified_date: "2024-01-02 12:30:00".to_string(),
      filename: "index.ts".to_string(),
      year: "2023".to_string(),
    }
  }

  #[test]
  fn test_minimal_template() {
    let manager = TemplateManager::new("Leon", "leon@example.com", 0);
    let banner = manager.render(&data()).unwrap();
    assert_eq!(
      banner,
      "/**\n * Created by Leon<leon@example.com> at 2023-04-01 10:00:00.\n * Last modified at 2024-01-02 12:30:00\n */\n\n"
    );
  }

  #[test]
  fn test_structured_template() {
    let manager = TemplateManager::new("Leon", "leon@example.com", 1);
    let banner = manager.render(&data()).unwrap();
    assert!(banner.contains(" * @file index.ts\n"));
    assert!(banner.contains(" * @created 2023-04-01 10:00:00\n"));
    assert!(banner.contains(" * @lastModified 2024-01-02 12:30:00\n"));
    assert!(banner.contains(" * @author Leon\n"));
    assert!(banner.contains(" * @email leon@example.com\n"));
    assert!(banner.contains(" * @copyright Copyright (c) 2023\n"));
    assert!(banner.ends_with(" */\n\n"));
  }

  #[test]
  fn test_out_of_range_index_falls_back_to_first() {
    let manager = TemplateManager::new("Leon", "leon@example.com", 99);
    assert_eq!(manager.selected_index(), 0);
    assert_eq!(manager.selected().name, "minimal");
    assert_eq!(manager.template_count(), 2);
  }

  #[test]
  fn test_no_placeholder_left_in_any_template() {
    for index in 0..2 {
      let manager = TemplateManager::new("A", "a@b.c", index);
      let banner = manager.render(&data()).unwrap();
      assert!(!banner.contains("{{"), "template {index} left a token: {banner}");
    }
  }

  #[test]
  fn test_value_containing_token_is_not_an_error() {
    let manager = TemplateManager::new("Leon", "leon@example.com", 1);
    let mut weird = data();
    weird.filename = "{{year}}.ts".to_string();
    let banner = manager.render(&weird).unwrap();
    assert!(banner.contains("@file {{year}}.ts"));
  }

  #[test]
  fn test_repeated_placeholder_is_rejected() {
    let manager = TemplateManager {
      templates: vec![BannerTemplate {
        name: "twice",
        text: "/** {{year}} - {{year}} */\n\n".to_string(),
      }],
      selected: 0,
    };
    assert_eq!(
      manager.render(&data()),
      Err(TemplateError::UnresolvedPlaceholder(YEAR))
    );
  }
}
