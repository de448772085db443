use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, SubsecRound, Utc};

use crate::{
    errors::ApiError,
    models::{clamp_charge, Message, User},
    validation::{validate_name, validate_subject, validate_text},
};

/// Longest token prefix considered during lookup.
pub const TOKEN_MAX_LEN: usize = 255;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Monotonic id allocator starting at 1. Ids are never handed out twice.
#[derive(Debug, Clone)]
pub struct Sequence {
    next: u64,
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence { next: 1 }
    }
}

impl Sequence {
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// In-memory users and messages. State lives as long as the process.
pub struct Store {
    users: HashMap<u64, User>,
    user_id_by_name: HashMap<String, u64>,
    user_id_by_token: HashMap<String, u64>,
    messages: HashMap<u64, Message>,
    user_ids: Sequence,
    message_ids: Sequence,
    clock: Arc<dyn Clock>,
}

impl Default for Store {
    fn default() -> Self {
        Store::new(Arc::new(SystemClock))
    }
}

impl Store {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Store {
            users: HashMap::new(),
            user_id_by_name: HashMap::new(),
            user_id_by_token: HashMap::new(),
            messages: HashMap::new(),
            user_ids: Sequence::default(),
            message_ids: Sequence::default(),
            clock,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(0)
    }

    /// Returns the user registered under `name`, registering it first if
    /// needed. The token of a new user is its id.
    pub fn authorize(&mut self, name: Option<&str>) -> Result<User, ApiError> {
        let name = validate_name(name)?;

        if let Some(user) = self
            .user_id_by_name
            .get(name)
            .and_then(|id| self.users.get(id))
        {
            return Ok(user.clone());
        }

        let id = self.user_ids.next_id();
        let user = User {
            id,
            name: name.to_string(),
            token: id.to_string(),
        };
        self.user_id_by_name.insert(user.name.clone(), id);
        self.user_id_by_token.insert(user.token.clone(), id);
        self.users.insert(id, user.clone());

        tracing::info!(user_id = id, name = %user.name, "registered user");
        Ok(user)
    }

    pub fn resolve_user(&self, token: &str) -> Option<&User> {
        let token = match token.char_indices().nth(TOKEN_MAX_LEN) {
            Some((end, _)) => &token[..end],
            None => token,
        };
        self.user_id_by_token
            .get(token)
            .and_then(|id| self.users.get(id))
    }

    /// Messages in no particular order.
    pub fn list_messages(&self) -> Vec<Message> {
        self.messages.values().cloned().collect()
    }

    pub fn get_message(&self, id: u64) -> Result<Message, ApiError> {
        self.messages.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    pub fn create_message(
        &mut self,
        author: &User,
        subject: Option<String>,
        text: Option<String>,
    ) -> Result<Message, ApiError> {
        let subject = validate_subject(subject)?;
        let text = validate_text(text)?;

        let now = self.now();
        let message = Message {
            id: self.message_ids.next_id(),
            author: author.name.clone(),
            subject,
            text,
            charge: 0,
            created_at: now,
            updated_at: now,
        };
        self.messages.insert(message.id, message.clone());

        tracing::info!(message_id = message.id, author = %message.author, "created message");
        Ok(message)
    }

    pub fn update_message(
        &mut self,
        id: u64,
        author: &User,
        subject: Option<String>,
        text: Option<String>,
    ) -> Result<Message, ApiError> {
        let now = self.now();
        let message = self.messages.get_mut(&id).ok_or(ApiError::NotFound)?;
        if message.author != author.name {
            tracing::debug!(message_id = id, user = %author.name, "update refused, not the author");
            return Err(ApiError::Forbidden);
        }

        let subject = validate_subject(subject)?;
        let text = validate_text(text)?;

        message.subject = subject;
        message.text = text;
        message.updated_at = now;

        tracing::info!(message_id = id, "updated message");
        Ok(message.clone())
    }

    pub fn delete_message(&mut self, id: u64, author: &User) -> Result<(), ApiError> {
        let message = self.messages.get(&id).ok_or(ApiError::NotFound)?;
        if message.author != author.name {
            tracing::debug!(message_id = id, user = %author.name, "delete refused, not the author");
            return Err(ApiError::Forbidden);
        }
        if message.is_locked() {
            tracing::debug!(message_id = id, charge = message.charge, "delete refused, message is charged");
            return Err(ApiError::Locked {
                charge: message.charge,
            });
        }

        self.messages.remove(&id);
        tracing::info!(message_id = id, "deleted message");
        Ok(())
    }

    /// Any authenticated user may adjust the charge, author or not.
    pub fn increase_charge(&mut self, id: u64) -> Result<u8, ApiError> {
        self.adjust_charge(id, 1)
    }

    pub fn decrease_charge(&mut self, id: u64) -> Result<u8, ApiError> {
        self.adjust_charge(id, -1)
    }

    fn adjust_charge(&mut self, id: u64, delta: i64) -> Result<u8, ApiError> {
        let now = self.now();
        let message = self.messages.get_mut(&id).ok_or(ApiError::NotFound)?;
        message.charge = clamp_charge(i64::from(message.charge) + delta);
        message.updated_at = now;

        tracing::info!(message_id = id, charge = message.charge, "charge changed");
        Ok(message.charge)
    }
}
