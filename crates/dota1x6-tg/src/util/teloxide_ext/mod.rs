mod requester;

use easy_ext::ext;
use teloxide::types::{Chat, User};

pub(crate) mod prelude {
    pub(crate) use super::{requester::UtilRequesterExt as _, ChatExt as _, UserExt as _};
}

#[ext(UserExt)]
pub(crate) impl User {
    fn username_or_full_name(&self) -> String {
        self.username.clone().unwrap_or_else(|| self.full_name())
    }

    fn debug_id(&self) -> String {
        format!("{} ({})", self.username_or_full_name(), self.id)
    }
}

#[ext(ChatExt)]
pub(crate) impl Chat {
    fn debug_id(&self) -> String {
        let title = self
            .title()
            .or_else(|| self.username())
            .unwrap_or("{unknown_chat_title}");

        format!("{title} ({})", self.id)
    }
}
