//! Session de-duplication for fragmented sources
//!
//! Claude transcripts and OpenCode documents can mention the same session id
//! from several files. The first registration wins; later ones are dropped.

use std::collections::HashSet;

use crate::core::types::Session;

/// Incremental accumulator that keeps sessions in registration order.
#[derive(Debug, Default)]
pub(crate) struct SessionDedup {
    seen: HashSet<String>,
    sessions: Vec<Session>,
    duplicates: usize,
}

impl SessionDedup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns false when a session with the same id was already registered.
    pub(crate) fn push(&mut self, session: Session) -> bool {
        if self.seen.contains(&session.id) {
            self.duplicates += 1;
            return false;
        }
        self.seen.insert(session.id.clone());
        self.sessions.push(session);
        true
    }

    pub(crate) fn extend<I>(&mut self, sessions: I)
    where
        I: IntoIterator<Item = Session>,
    {
        for session in sessions {
            self.push(session);
        }
    }

    /// Returns the unique sessions and how many duplicates were dropped.
    pub(crate) fn finalize(self) -> (Vec<Session>, usize) {
        (self.sessions, self.duplicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceKind;

    fn session(id: &str, ts: i64, cwd: &str) -> Session {
        Session {
            id: id.to_string(),
            timestamp_ms: ts,
            cwd: cwd.to_string(),
            provider_id: "anthropic".to_string(),
            model_id: String::new(),
            source: SourceKind::Claude,
        }
    }

    #[test]
    fn first_registration_wins() {
        let mut dedup = SessionDedup::new();
        assert!(dedup.push(session("a", 200, "/first")));
        assert!(!dedup.push(session("a", 100, "/second")));

        let (sessions, duplicates) = dedup.finalize();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].cwd, "/first");
        assert_eq!(sessions[0].timestamp_ms, 200);
        assert_eq!(duplicates, 1);
    }

    #[test]
    fn keeps_registration_order() {
        let mut dedup = SessionDedup::new();
        dedup.extend(vec![session("b", 1, ""), session("a", 2, ""), session("b", 3, "")]);
        let (sessions, duplicates) = dedup.finalize();
        let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(duplicates, 1);
    }

    #[test]
    fn empty_accumulator_finalizes_empty() {
        let (sessions, duplicates) = SessionDedup::new().finalize();
        assert!(sessions.is_empty());
        assert_eq!(duplicates, 0);
    }
}
