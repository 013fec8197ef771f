use vulkan_client::Client;
use vulkan_core::session::Session;

use crate::toast::Toasts;

/// State shared by every view: the backend client and the toast queue.
pub struct AppContext {
    pub client: Client,
    pub toasts: Toasts,
}

impl AppContext {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            toasts: Toasts::default(),
        }
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }
}
