//! Owner and group names for long listings

/// Resolves uids and gids to names, falling back to the number when the
/// system has no name for it.
pub struct Identities {
    #[cfg(unix)]
    cache: users::UsersCache,
}

impl Identities {
    pub fn new() -> Self {
        Self {
            #[cfg(unix)]
            cache: users::UsersCache::new(),
        }
    }

    #[cfg(unix)]
    pub fn owner(&self, uid: u32) -> String {
        use users::Users;

        self.cache
            .get_user_by_uid(uid)
            .map(|u| u.name().to_string_lossy().to_string())
            .unwrap_or_else(|| uid.to_string())
    }

    #[cfg(unix)]
    pub fn group(&self, gid: u32) -> String {
        use users::Groups;

        self.cache
            .get_group_by_gid(gid)
            .map(|g| g.name().to_string_lossy().to_string())
            .unwrap_or_else(|| gid.to_string())
    }

    #[cfg(not(unix))]
    pub fn owner(&self, uid: u32) -> String {
        uid.to_string()
    }

    #[cfg(not(unix))]
    pub fn group(&self, gid: u32) -> String {
        gid.to_string()
    }
}

impl Default for Identities {
    fn default() -> Self {
        Self::new()
    }
}
