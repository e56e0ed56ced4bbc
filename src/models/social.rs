// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication kind. Announcements (comunicados) share the social entity
/// with regular posts and polls; the kind field tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostKind {
    #[serde(rename = "publicacion")]
    Publication,
    #[serde(rename = "comunicado")]
    Announcement,
    #[serde(rename = "encuesta")]
    Poll,
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostKind::Publication => write!(f, "publicacion"),
            PostKind::Announcement => write!(f, "comunicado"),
            PostKind::Poll => write!(f, "encuesta"),
        }
    }
}

/// A social publication or announcement from the administration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "contenido")]
    pub body: String,
    #[serde(rename = "tipo_publicacion")]
    pub kind: PostKind,
    #[serde(rename = "estado")]
    pub status: Option<String>,
    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "para_todos", default)]
    pub for_everyone: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_kind_wire_names() {
        let json = r#"{"id":3,"titulo":"Corte de agua","contenido":"El martes de 9 a 12",
            "tipo_publicacion":"comunicado","estado":"publicado",
            "fecha_creacion":"2025-04-02T15:00:00Z","para_todos":true}"#;
        let post: Post = serde_json::from_str(json).expect("parse post");
        assert_eq!(post.kind, PostKind::Announcement);
        assert!(post.for_everyone);
    }
}
