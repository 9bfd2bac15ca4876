//! Request DTOs
//!
//! Data structures for API request bodies. Schema validation messages are
//! Portuguese, matching the user-facing error contract.

use serde::Deserialize;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "O sobrenome é obrigatório"))]
    pub last_name: String,

    #[validate(email(message = "E-mail inválido"))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub password: String,

    #[validate(length(min = 11, max = 14, message = "CPF inválido"))]
    pub cpf: String,

    #[validate(length(min = 8, max = 20, message = "Telefone inválido"))]
    pub phone: String,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    #[serde(default)]
    pub is_driver: bool,

    #[serde(default)]
    pub is_passenger: bool,
}

/// Update user request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "O sobrenome é obrigatório"))]
    pub last_name: Option<String>,

    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub password: Option<String>,

    #[validate(length(min = 8, max = 20, message = "Telefone inválido"))]
    pub phone: Option<String>,

    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Create ride group request.
///
/// Membership bounds and the driver requirement are domain rules checked by
/// the use case, which reports them as `InvalidArgument`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRideGroupRequest {
    #[validate(length(min = 1, max = 100, message = "O nome do grupo é obrigatório"))]
    pub name: String,

    pub driver_id: Option<i64>,

    #[serde(default)]
    pub members: Vec<i64>,
}

/// Create chat group request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChatGroupRequest {
    #[validate(length(min = 2, max = 100, message = "O nome deve ter entre 2 e 100 caracteres"))]
    pub name: String,

    pub description: Option<String>,

    /// "group" (default) or "direct"
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub max_members: Option<i32>,
}

/// Send message request
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(max = 4000, message = "A mensagem excede o limite de 4000 caracteres"))]
    pub content: Option<String>,

    /// "text" (default), "image", "file", "audio" or "video"
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub file_url: Option<String>,

    pub reply_to_id: Option<i64>,
}

/// Edit message request
#[derive(Debug, Deserialize, Validate)]
pub struct EditMessageRequest {
    #[validate(length(
        min = 1,
        max = 4000,
        message = "O conteúdo deve ter entre 1 e 4000 caracteres"
    ))]
    pub content: String,
}
