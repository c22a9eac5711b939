//! Sparse style records
//!
//! A [`StyleMap`] is the style state shared over the wire: a fixed set of
//! named fields, each optional. Unset fields are omitted from the JSON
//! form, never serialized as `null`.

use serde::{Deserialize, Serialize};

/// Sparse mapping of style fields to string values
///
/// Two fields are the *position fields* (`left`, `top`) and two are the
/// *transform fields* (`transform`, `transformOrigin`); the partial-update
/// protocol only ever overwrites those four. Everything else is written at
/// creation and then left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMap {
    /// CSS `background-color`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// CSS `border`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    /// CSS `color`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// CSS `font-size`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// CSS `width`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// CSS `height`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// CSS `position`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// CSS `left` (position field)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    /// CSS `top` (position field)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    /// CSS `transform` (transform field)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    /// CSS `transform-origin` (transform field)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_origin: Option<String>,
    /// CSS `margin`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    /// CSS `box-shadow`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
}

impl StyleMap {
    /// The position fields `(left, top)`, when both are set
    #[inline]
    #[must_use]
    pub fn position_fields(&self) -> Option<(&str, &str)> {
        Some((self.left.as_deref()?, self.top.as_deref()?))
    }

    /// The transform fields `(transform, transformOrigin)`, when both are set
    #[inline]
    #[must_use]
    pub fn transform_fields(&self) -> Option<(&str, &str)> {
        Some((self.transform.as_deref()?, self.transform_origin.as_deref()?))
    }

    /// Overwrite the position fields
    #[inline]
    pub fn set_position(&mut self, left: impl Into<String>, top: impl Into<String>) {
        self.left = Some(left.into());
        self.top = Some(top.into());
    }

    /// Overwrite the transform fields
    #[inline]
    pub fn set_transform(&mut self, transform: impl Into<String>, origin: impl Into<String>) {
        self.transform = Some(transform.into());
        self.transform_origin = Some(origin.into());
    }
}
