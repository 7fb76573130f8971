//! Entity pools
//!
//! A pool exclusively owns its members. `update` advances every member one
//! tick and culls those whose own expiry rule fires. Destruction decided by
//! the collision pass is deferred: `kill` marks a member, the marked member
//! disappears from iteration at once, and `apply_removals` drops it.

use super::geometry::Field;

/// Per-kind motion and lifetime rule
pub trait Pooled {
    /// Stable entity id (unique within a session)
    fn id(&self) -> u32;

    /// Advance one tick
    fn advance(&mut self, field: &Field);

    /// True once the member should leave the pool on its own
    fn expired(&self, field: &Field) -> bool;
}

/// Owning collection of one entity kind
#[derive(Debug, Clone)]
pub struct Pool<T> {
    members: Vec<T>,
    /// Ids killed this tick, awaiting `apply_removals`
    doomed: Vec<u32>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            doomed: Vec::new(),
        }
    }
}

impl<T: Pooled> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, member: T) {
        self.members.push(member);
    }

    pub fn extend(&mut self, members: impl IntoIterator<Item = T>) {
        self.members.extend(members);
    }

    /// Advance every member, then cull the expired ones
    pub fn update(&mut self, field: &Field) {
        for member in &mut self.members {
            member.advance(field);
        }
        self.members.retain(|m| !m.expired(field));
    }

    /// Mark a member for removal; false if absent or already marked
    pub fn kill(&mut self, id: u32) -> bool {
        if self.doomed.contains(&id) || !self.members.iter().any(|m| m.id() == id) {
            return false;
        }
        self.doomed.push(id);
        true
    }

    pub fn is_alive(&self, id: u32) -> bool {
        !self.doomed.contains(&id) && self.members.iter().any(|m| m.id() == id)
    }

    /// Drop every member marked by `kill`
    pub fn apply_removals(&mut self) {
        if self.doomed.is_empty() {
            return;
        }
        let doomed = std::mem::take(&mut self.doomed);
        self.members.retain(|m| !doomed.contains(&m.id()));
    }

    /// Live members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.members.iter().filter(|m| !self.doomed.contains(&m.id()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        let doomed = &self.doomed;
        self.members.iter_mut().filter(move |m| !doomed.contains(&m.id()))
    }

    /// Number of live members
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Ticker {
        id: u32,
        age: u32,
        ttl: u32,
    }

    impl Pooled for Ticker {
        fn id(&self) -> u32 {
            self.id
        }

        fn advance(&mut self, _field: &Field) {
            self.age += 1;
        }

        fn expired(&self, _field: &Field) -> bool {
            self.age >= self.ttl
        }
    }

    fn ticker(id: u32, ttl: u32) -> Ticker {
        Ticker { id, age: 0, ttl }
    }

    #[test]
    fn test_update_culls_expired() {
        let field = Field::new(100.0, 100.0);
        let mut pool = Pool::new();
        pool.add(ticker(1, 1));
        pool.add(ticker(2, 3));

        pool.update(&field);
        assert_eq!(pool.len(), 1);
        assert!(pool.is_alive(2));

        pool.update(&field);
        pool.update(&field);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_kill_hides_then_removes() {
        let mut pool = Pool::new();
        pool.extend([ticker(1, 10), ticker(2, 10), ticker(3, 10)]);

        assert!(pool.kill(2));
        assert!(!pool.kill(2), "double kill must be rejected");
        assert!(!pool.kill(99));
        assert!(!pool.is_alive(2));

        let ids: Vec<u32> = pool.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);

        pool.apply_removals();
        assert_eq!(pool.len(), 2);
        // Id no longer present, so it can't be killed again
        assert!(!pool.kill(2));
    }

    #[test]
    fn test_iter_mut_skips_doomed() {
        let mut pool = Pool::new();
        pool.extend([ticker(1, 10), ticker(2, 10)]);
        pool.kill(1);
        for t in pool.iter_mut() {
            t.age = 5;
        }
        pool.apply_removals();
        assert_eq!(pool.iter().next().map(|t| t.age), Some(5));
    }
}
