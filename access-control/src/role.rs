//! Roles and the role table.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    std::{
        collections::{HashMap, HashSet},
        fmt,
    },
};

/// Domain separator for named role ids.
const ROLE_DOMAIN: &[u8] = b"trv1-role";

/// An opaque, fixed-width role identifier.
///
/// `Role::default()` is [`Role::ROOT`], so an unset admin entry means "root".
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Role(Hash);

impl Role {
    /// The controller role.  Admin of itself and of every role without an
    /// explicit admin.
    pub const ROOT: Role = Role(Hash::new_from_array([0u8; 32]));

    /// Pseudo-role held by every account.
    pub const OPEN: Role = Role(Hash::new_from_array([0xffu8; 32]));

    /// Derive a role id from a human-readable name.
    pub fn named(name: &str) -> Self {
        Role(solana_sha256_hasher::hashv(&[ROLE_DOMAIN, name.as_bytes()]))
    }

    pub const fn from_hash(hash: Hash) -> Self {
        Role(hash)
    }

    pub fn hash(&self) -> &Hash {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }

    pub fn is_open(&self) -> bool {
        *self == Self::OPEN
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "ROOT")
        } else if self.is_open() {
            write!(f, "OPEN")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RoleData {
    /// `None` means the role has never been given an admin (root applies).
    admin: Option<Role>,
    members: HashSet<Pubkey>,
}

/// Owns role-to-admin links and role membership.
///
/// The table performs no authorization of its own; the registry gates every
/// mutation before it reaches here.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    roles: HashMap<Role, RoleData>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit membership, or `true` for [`Role::OPEN`].  No membership row is
    /// ever stored for the open role.
    pub fn has_role(&self, role: &Role, account: &Pubkey) -> bool {
        if role.is_open() {
            return true;
        }
        self.roles
            .get(role)
            .map(|data| data.members.contains(account))
            .unwrap_or(false)
    }

    pub fn admin_of(&self, role: &Role) -> Role {
        self.roles
            .get(role)
            .and_then(|data| data.admin)
            .unwrap_or(Role::ROOT)
    }

    /// Set the admin of `role`, returning the previous admin.
    pub fn set_admin(&mut self, role: Role, admin: Role) -> Role {
        let data = self.roles.entry(role).or_default();
        let previous = data.admin.unwrap_or(Role::ROOT);
        data.admin = Some(admin);
        previous
    }

    /// Returns `true` if the account was not already a member.
    pub fn grant(&mut self, role: Role, account: Pubkey) -> bool {
        self.roles.entry(role).or_default().members.insert(account)
    }

    /// Returns `true` if the account was a member.
    pub fn revoke(&mut self, role: &Role, account: &Pubkey) -> bool {
        self.roles
            .get_mut(role)
            .map(|data| data.members.remove(account))
            .unwrap_or(false)
    }

    pub fn member_count(&self, role: &Role) -> usize {
        self.roles
            .get(role)
            .map(|data| data.members.len())
            .unwrap_or(0)
    }

    /// Every role `account` explicitly holds, in no particular order.
    pub fn roles_of<'a>(&'a self, account: &'a Pubkey) -> impl Iterator<Item = &'a Role> + 'a {
        self.roles
            .iter()
            .filter(move |(_, data)| data.members.contains(account))
            .map(|(role, _)| role)
    }
}
