//! Response DTOs
//!
//! Data structures for API response bodies. Successful responses are wrapped
//! in a `{data: ...}` envelope; deleted messages are redacted here, not in
//! the domain entity.

use serde::Serialize;

use crate::domain::{ChatGroup, Message, RideGroup, User};
use crate::shared::pagination::Page;

/// Success envelope: `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated list payload
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn from_page<S>(page: Page<S>, f: impl FnMut(S) -> T) -> Self {
        let mapped = page.map(f);
        Self {
            items: mapped.items,
            total_pages: mapped.total_pages,
        }
    }
}

/// User response; the password hash never leaves the server
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_driver: bool,
    pub is_passenger: bool,
    pub verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            last_name: user.last_name,
            email: user.email,
            cpf: user.cpf,
            phone: user.phone,
            address: user.address,
            city: user.city,
            state: user.state,
            is_driver: user.is_driver,
            is_passenger: user.is_passenger,
            verified: user.verified,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Chat group response
#[derive(Debug, Serialize)]
pub struct ChatGroupResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_by: i64,
    pub is_active: bool,
    pub max_members: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ChatGroup> for ChatGroupResponse {
    fn from(group: ChatGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
            description: group.description,
            kind: group.kind.as_str().to_string(),
            created_by: group.created_by,
            is_active: group.is_active,
            max_members: group.max_members,
            created_at: group.created_at.to_rfc3339(),
            updated_at: group.updated_at.to_rfc3339(),
        }
    }
}

/// Message response.
///
/// Soft-deleted messages expose `content: null` and `file_url: null` while
/// the deletion metadata remains visible.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub group_id: i64,
    pub sender_id: i64,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub file_url: Option<String>,
    pub reply_to_id: Option<i64>,
    pub status: String,
    pub is_deleted: bool,
    pub edited_at: Option<String>,
    pub deleted_at: Option<String>,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        let (content, file_url) = if message.is_deleted {
            (None, None)
        } else {
            (message.content, message.file_url)
        };

        Self {
            id: message.id,
            group_id: message.group_id,
            sender_id: message.sender_id,
            content,
            kind: message.kind.as_str().to_string(),
            file_url,
            reply_to_id: message.reply_to_id,
            status: message.status.as_str().to_string(),
            is_deleted: message.is_deleted,
            edited_at: message.edited_at.map(|t| t.to_rfc3339()),
            deleted_at: message.deleted_at.map(|t| t.to_rfc3339()),
            created_at: message.created_at.to_rfc3339(),
        }
    }
}

/// Ride group response
#[derive(Debug, Serialize)]
pub struct RideGroupResponse {
    pub id: i64,
    pub name: String,
    pub driver_id: i64,
    pub members: Vec<i64>,
    pub created_at: String,
}

impl From<RideGroup> for RideGroupResponse {
    fn from(group: RideGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
            driver_id: group.driver_id,
            members: group.member_ids,
            created_at: group.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageKind;

    #[test]
    fn test_deleted_message_is_redacted() {
        let mut message = Message {
            id: 1,
            group_id: 2,
            sender_id: 3,
            content: Some("segredo".into()),
            kind: MessageKind::Image,
            file_url: Some("https://cdn.example/foto.png".into()),
            ..Message::default()
        };
        message.soft_delete();

        let response = MessageResponse::from(message);

        assert!(response.content.is_none());
        assert!(response.file_url.is_none());
        assert!(response.is_deleted);
        assert!(response.deleted_at.is_some());
    }

    #[test]
    fn test_intact_message_keeps_content() {
        let message = Message {
            id: 1,
            group_id: 2,
            sender_id: 3,
            content: Some("oi".into()),
            ..Message::default()
        };

        let response = MessageResponse::from(message);

        assert_eq!(response.content.as_deref(), Some("oi"));
        assert!(!response.is_deleted);
    }

    #[test]
    fn test_data_envelope_shape() {
        let body = Data::new(vec![1, 2, 3]);
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"data":[1,2,3]}"#);
    }

    #[test]
    fn test_page_response_renames_total_pages() {
        let page = Page {
            items: vec![1],
            total_pages: 4,
        };
        let response = PageResponse::from_page(page, |n| n * 2);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"totalPages\":4"));
        assert!(json.contains("\"items\":[2]"));
    }
}
