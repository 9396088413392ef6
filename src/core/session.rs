//! The roll-call controller: owns the roster, the draw pool, preferences,
//! selection and the roll state machine. Every mutation goes through here.

use crate::config::{Config, Preferences};
use crate::core::draw_pool::DrawPool;
use crate::core::import::load_roster;
use crate::core::timer::{Countdown, Ticker, clamp_countdown_secs};
use crate::db::log::Journal;
use crate::errors::{AppError, AppResult};
use crate::models::{Roster, Stats, StudentRecord};
use crate::sheet::{load_cache, save_cache};
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollState {
    Idle,
    Rolling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Paused,
    /// No-repeat mode and nobody left to draw: the roll did not start.
    AllPresent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Shown(String),
    /// Pool exhausted in no-repeat mode; the roll has been paused.
    Exhausted,
    Idle,
}

/// Something the timers produced during `poll`.
#[derive(Debug)]
pub enum SessionEvent {
    Tick(TickOutcome),
    AutoSign(AppResult<SignOutcome>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOutcome {
    pub row: usize,
    pub id: String,
    pub name: String,
    pub signed_at: NaiveDateTime,
}

pub struct Session<R: Rng = StdRng> {
    roster: Roster,
    pool: DrawPool,
    prefs: Preferences,
    state: RollState,
    last_shown: Option<String>,
    selection: BTreeSet<usize>,
    ticker: Ticker,
    countdown: Countdown,
    auto_sign_secs: u64,
    cache_path: Option<PathBuf>,
    state_path: Option<PathBuf>,
    journal: Journal,
    rng: R,
}

impl Session<StdRng> {
    /// Session backed by the files named in `cfg`: preferences are read,
    /// the journal is opened and the cached roster (if any) is loaded.
    pub fn from_config(cfg: &Config) -> Self {
        let mut session = Session::new(StdRng::from_entropy())
            .with_files(cfg.cache_path(), cfg.state_path())
            .with_journal(Journal::open(&cfg.database_path()));

        session.ticker.set_interval(cfg.roll_interval_ms);
        session.auto_sign_secs = clamp_countdown_secs(cfg.auto_sign_secs);
        session.autoload_cache();
        session
    }
}

impl<R: Rng> Session<R> {
    /// In-memory session: nothing is persisted until `with_files`.
    pub fn new(rng: R) -> Self {
        Self {
            roster: Roster::default(),
            pool: DrawPool::new(),
            prefs: Preferences::default(),
            state: RollState::Idle,
            last_shown: None,
            selection: BTreeSet::new(),
            ticker: Ticker::new(crate::core::timer::DEFAULT_INTERVAL_MS),
            countdown: Countdown::default(),
            auto_sign_secs: 0,
            cache_path: None,
            state_path: None,
            journal: Journal::disabled(),
            rng,
        }
    }

    /// Attach the cache and preference files; preferences are loaded now.
    pub fn with_files(mut self, cache: PathBuf, state: PathBuf) -> Self {
        self.prefs = Preferences::load(&state);
        self.cache_path = Some(cache);
        self.state_path = Some(state);
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_no_repeat(mut self, no_repeat: bool) -> Self {
        self.prefs.no_repeat = no_repeat;
        self
    }

    // ---------------------------
    // Accessors
    // ---------------------------

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn pool(&self) -> &DrawPool {
        &self.pool
    }

    pub fn state(&self) -> RollState {
        self.state
    }

    pub fn is_rolling(&self) -> bool {
        self.state == RollState::Rolling
    }

    pub fn no_repeat(&self) -> bool {
        self.prefs.no_repeat
    }

    pub fn last_shown(&self) -> Option<&str> {
        self.last_shown.as_deref()
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn stats(&self) -> Stats {
        self.roster.stats()
    }

    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }

    pub fn auto_sign_secs(&self) -> u64 {
        self.auto_sign_secs
    }

    // ---------------------------
    // Roster loading
    // ---------------------------

    /// Load the cached roster, silently ignoring a missing or broken cache.
    pub fn autoload_cache(&mut self) -> bool {
        let Some(path) = self.cache_path.clone() else {
            return false;
        };

        match load_cache(&path) {
            Ok(Some(roster)) if !roster.is_empty() => {
                self.use_roster(roster);
                true
            }
            _ => false,
        }
    }

    /// Replace the roster with the content of `path` and rewrite the cache.
    /// On error the current roster is left untouched.
    pub fn import(&mut self, path: &Path) -> AppResult<usize> {
        let roster = load_roster(path)?;
        let n = roster.len();

        self.use_roster(roster);
        self.persist_cache();
        self.journal.record(
            "import",
            &path.display().to_string(),
            &format!("Loaded {} students", n),
        );

        Ok(n)
    }

    /// Install a roster directly (attendance as given) and rebuild the pool.
    pub fn use_roster(&mut self, roster: Roster) {
        self.roster = roster;
        self.selection.clear();
        self.last_shown = None;
        self.rebuild_pool();
    }

    // ---------------------------
    // Roll control
    // ---------------------------

    pub fn toggle_roll(&mut self, now: Instant) -> AppResult<ToggleOutcome> {
        if self.is_rolling() {
            self.pause();
            Ok(ToggleOutcome::Paused)
        } else {
            self.start(now)
        }
    }

    /// `Idle → Rolling`. The first candidate is shown immediately.
    pub fn start(&mut self, now: Instant) -> AppResult<ToggleOutcome> {
        if self.roster.is_empty() {
            return Err(AppError::EmptyRoster);
        }
        if self.is_rolling() {
            return Ok(ToggleOutcome::Started);
        }
        if self.prefs.no_repeat && self.roster.all_present() {
            return Ok(ToggleOutcome::AllPresent);
        }

        if self.pool.is_empty() {
            self.rebuild_pool();
        }

        self.state = RollState::Rolling;
        self.ticker.start(now);
        self.countdown.arm(now, self.auto_sign_secs);

        match self.tick() {
            TickOutcome::Exhausted => Ok(ToggleOutcome::AllPresent),
            _ => Ok(ToggleOutcome::Started),
        }
    }

    /// `Rolling → Idle`; stops both timers.
    pub fn pause(&mut self) {
        self.state = RollState::Idle;
        self.ticker.stop();
        self.countdown.cancel();
    }

    /// Advance the display by one random candidate.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_rolling() {
            return TickOutcome::Idle;
        }

        let picked = self
            .pool
            .next(&self.roster, self.prefs.no_repeat, &mut self.rng)
            .and_then(|idx| self.roster.get(idx))
            .map(StudentRecord::display_text);

        match picked {
            Some(text) => {
                self.last_shown = Some(text.clone());
                TickOutcome::Shown(text)
            }
            None => {
                self.pause();
                TickOutcome::Exhausted
            }
        }
    }

    /// Fire whatever timers are due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        if self.ticker.poll(now) {
            events.push(SessionEvent::Tick(self.tick()));
        }
        if self.countdown.poll(now) {
            events.push(SessionEvent::AutoSign(self.sign()));
        }

        events
    }

    /// Time left before the next timer fires, if any is running.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        match (self.ticker.time_until(now), self.countdown.time_until(now)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn set_interval(&mut self, ms: u64) -> u64 {
        self.ticker.set_interval(ms)
    }

    pub fn set_auto_sign_secs(&mut self, secs: u64) -> u64 {
        self.auto_sign_secs = clamp_countdown_secs(secs);
        self.auto_sign_secs
    }

    // ---------------------------
    // Selection
    // ---------------------------

    /// Replace the selection with `rows` (0-based positions).
    pub fn select(&mut self, rows: &[usize]) -> AppResult<()> {
        if let Some(bad) = rows.iter().find(|&&r| r >= self.roster.len()) {
            return Err(AppError::InvalidRow((bad + 1).to_string()));
        }
        self.selection = rows.iter().copied().collect();
        Ok(())
    }

    pub fn unselect(&mut self) {
        self.selection.clear();
    }

    // ---------------------------
    // Attendance
    // ---------------------------

    /// Row the next sign-in applies to: the id shown by the roll display,
    /// else its name if unique, else the first selected row.
    pub fn find_target(&self) -> Option<usize> {
        let text = self.last_shown.as_deref().unwrap_or("").trim();
        let mut parts = text.split_whitespace();

        if let Some(sid) = parts.next() {
            if let Some(row) = self.roster.find_by_id(sid) {
                return Some(row);
            }

            let name = parts.collect::<Vec<_>>().join(" ");
            if !name.is_empty()
                && let Some(row) = self.roster.find_unique_by_name(&name)
            {
                return Some(row);
            }
        }

        self.selection
            .iter()
            .copied()
            .find(|&r| r < self.roster.len())
    }

    pub fn sign(&mut self) -> AppResult<SignOutcome> {
        self.sign_at(Local::now().naive_local())
    }

    /// Mark the current target present at `at`. Pauses an active roll first.
    pub fn sign_at(&mut self, at: NaiveDateTime) -> AppResult<SignOutcome> {
        if self.roster.is_empty() {
            return Err(AppError::EmptyRoster);
        }
        if self.is_rolling() {
            self.pause();
        }

        let row = self.find_target().ok_or(AppError::NoSignTarget)?;
        self.roster.sign(row, at);

        if self.prefs.no_repeat {
            self.pool.remove(row);
        }

        self.persist_cache();

        let rec = self.record(row)?;
        let outcome = SignOutcome {
            row,
            id: rec.id.clone(),
            name: rec.name.clone(),
            signed_at: at,
        };
        self.journal.record("sign", &outcome.id, &outcome.name);

        Ok(outcome)
    }

    /// Reset every record. Confirmation is the caller's job.
    pub fn clear_all(&mut self) -> AppResult<()> {
        if self.roster.is_empty() {
            return Err(AppError::EmptyRoster);
        }

        self.roster.clear_all();
        self.rebuild_pool();
        self.persist_cache();
        self.journal.record("clear", "all", "All attendance cleared");
        Ok(())
    }

    /// Reset only the selected rows. Returns how many were cleared.
    pub fn clear_selected(&mut self) -> AppResult<usize> {
        if self.roster.is_empty() {
            return Err(AppError::EmptyRoster);
        }
        if self.selection.is_empty() {
            return Err(AppError::NoSelection);
        }

        let mut n = 0;
        for &row in &self.selection {
            if self.roster.clear(row) {
                n += 1;
            }
        }

        self.rebuild_pool();
        self.persist_cache();
        self.journal
            .record("clear", "selected", &format!("Cleared {} row(s)", n));
        Ok(n)
    }

    /// Switch drawing policy and rebuild the pool, then persist it.
    /// The switch applies even when the preference file cannot be written;
    /// the write error is returned for callers that want to surface it.
    pub fn set_no_repeat(&mut self, on: bool) -> AppResult<()> {
        self.prefs.no_repeat = on;
        self.rebuild_pool();
        self.journal.record(
            "no_repeat",
            if on { "on" } else { "off" },
            "Drawing policy changed",
        );

        match &self.state_path {
            Some(path) => self.prefs.save(path),
            None => Ok(()),
        }
    }

    pub fn record_export(&mut self, path: &Path) {
        self.journal.record(
            "export",
            &path.display().to_string(),
            &format!("Exported {} rows", self.roster.len()),
        );
    }

    // ---------------------------
    // Internals
    // ---------------------------

    fn rebuild_pool(&mut self) {
        self.pool
            .rebuild(&self.roster, self.prefs.no_repeat, &mut self.rng);
    }

    /// Best effort: cache write failures never reach the user.
    fn persist_cache(&self) {
        if let Some(path) = &self.cache_path {
            save_cache(path, &self.roster).ok();
        }
    }

    fn record(&self, row: usize) -> AppResult<&StudentRecord> {
        self.roster
            .get(row)
            .ok_or_else(|| AppError::InvalidRow((row + 1).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentRecord;
    use chrono::NaiveDate;

    fn session(ids: &[(&str, &str)]) -> Session<StdRng> {
        let mut s = Session::new(StdRng::seed_from_u64(42));
        s.use_roster(Roster::new(
            ids.iter().map(|(i, n)| StudentRecord::new(i, n)).collect(),
        ));
        s
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn assert_no_present_in_pool(s: &Session<StdRng>) {
        for &i in s.pool().indices() {
            assert!(!s.roster().get(i).unwrap().present, "index {i} is present");
        }
    }

    #[test]
    fn roll_and_sign_example() {
        let mut s = session(&[("1", "A"), ("2", "B")]);
        let t0 = Instant::now();

        assert_eq!(s.start(t0).unwrap(), ToggleOutcome::Started);
        assert!(s.is_rolling());
        assert!(s.last_shown().is_some());

        // force the display onto student "1"
        s.last_shown = Some("1  A".to_string());
        let out = s.sign_at(at()).unwrap();

        assert_eq!(out.id, "1");
        assert!(!s.is_rolling());
        let st = s.stats();
        assert_eq!((st.total, st.present, st.absent), (2, 1, 1));
        assert_eq!(s.pool().indices(), &[1]);
        assert_eq!(
            s.roster().get(0).unwrap().signed_at_str(),
            "2025-09-01 09:15:00"
        );
    }

    #[test]
    fn start_requires_a_roster() {
        let mut s: Session<StdRng> = Session::new(StdRng::seed_from_u64(1));
        assert!(matches!(s.start(Instant::now()), Err(AppError::EmptyRoster)));
        assert!(matches!(s.sign_at(at()), Err(AppError::EmptyRoster)));
    }

    #[test]
    fn exhaustion_rejects_start_in_no_repeat() {
        let mut s = session(&[("1", "A")]);
        s.select(&[0]).unwrap();
        s.sign_at(at()).unwrap();

        assert_eq!(s.start(Instant::now()).unwrap(), ToggleOutcome::AllPresent);
        assert!(!s.is_rolling());

        // repeat mode may still roll
        s.set_no_repeat(false).unwrap();
        assert_eq!(s.start(Instant::now()).unwrap(), ToggleOutcome::Started);
    }

    #[test]
    fn tick_pauses_when_pool_runs_dry() {
        let mut s = session(&[("1", "A"), ("2", "B")]);
        s.start(Instant::now()).unwrap();

        // mark everyone present behind the pool's back
        s.roster.sign(0, at());
        s.roster.sign(1, at());
        s.pool = DrawPool::new();

        assert_eq!(s.tick(), TickOutcome::Exhausted);
        assert!(!s.is_rolling());
        assert_eq!(s.tick(), TickOutcome::Idle);
    }

    #[test]
    fn toggle_alternates() {
        let mut s = session(&[("1", "A"), ("2", "B")]);
        let t0 = Instant::now();
        assert_eq!(s.toggle_roll(t0).unwrap(), ToggleOutcome::Started);
        assert_eq!(s.toggle_roll(t0).unwrap(), ToggleOutcome::Paused);
        assert_eq!(s.state(), RollState::Idle);
        assert_eq!(s.next_wakeup(t0), None);
    }

    #[test]
    fn target_by_name_requires_unique_match() {
        let mut s = session(&[("1", "Anna"), ("2", "Bruno"), ("3", "Anna")]);

        s.last_shown = Some("99  Bruno".to_string());
        assert_eq!(s.find_target(), Some(1));

        s.last_shown = Some("99  Anna".to_string());
        assert_eq!(s.find_target(), None);

        s.select(&[2]).unwrap();
        assert_eq!(s.find_target(), Some(2));
    }

    #[test]
    fn multi_word_names_are_rejoined() {
        let mut s = session(&[("1", "Mary Ann Lee"), ("2", "B")]);
        s.last_shown = Some("x  Mary   Ann Lee".to_string());
        assert_eq!(s.find_target(), Some(0));
    }

    #[test]
    fn sign_without_target_is_a_no_op() {
        let mut s = session(&[("1", "A")]);
        assert!(matches!(s.sign_at(at()), Err(AppError::NoSignTarget)));
        assert_eq!(s.stats().present, 0);
        assert_eq!(s.pool().len(), 1);
    }

    #[test]
    fn sign_twice_keeps_pool_stable() {
        let mut s = session(&[("1", "A"), ("2", "B"), ("3", "C")]);
        s.select(&[1]).unwrap();
        s.sign_at(at()).unwrap();
        assert_eq!(s.pool().len(), 2);

        s.sign_at(at()).unwrap();
        assert_eq!(s.pool().len(), 2);
        assert_eq!(s.stats().present, 1);
        assert_no_present_in_pool(&s);
    }

    #[test]
    fn repeat_mode_keeps_signed_in_pool() {
        let mut s = session(&[("1", "A"), ("2", "B")]).with_no_repeat(false);
        s.rebuild_pool();
        s.select(&[0]).unwrap();
        s.sign_at(at()).unwrap();
        assert_eq!(s.pool().len(), 2);
    }

    #[test]
    fn clear_selected_requires_selection() {
        let mut s = session(&[("1", "A"), ("2", "B")]);
        assert!(matches!(s.clear_selected(), Err(AppError::NoSelection)));

        s.select(&[0, 1]).unwrap();
        s.sign_at(at()).unwrap();
        s.select(&[1]).unwrap();
        s.sign_at(at()).unwrap();
        assert_eq!(s.stats().present, 2);
        assert!(s.pool().is_empty());

        s.select(&[0]).unwrap();
        assert_eq!(s.clear_selected().unwrap(), 1);
        assert_eq!(s.stats().present, 1);
        assert_eq!(s.pool().indices(), &[0]);
        assert_no_present_in_pool(&s);
    }

    #[test]
    fn clear_all_refills_pool() {
        let mut s = session(&[("1", "A"), ("2", "B")]);
        s.select(&[0]).unwrap();
        s.sign_at(at()).unwrap();

        s.clear_all().unwrap();
        assert_eq!(s.stats().present, 0);
        assert_eq!(s.pool().len(), 2);
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut s = session(&[("1", "A")]);
        assert!(matches!(s.select(&[3]), Err(AppError::InvalidRow(r)) if r == "4"));
        assert!(s.selection().is_empty());
    }

    #[test]
    fn countdown_signs_automatically() {
        let mut s = session(&[("1", "A"), ("2", "B")]);
        s.set_auto_sign_secs(1);
        let t0 = Instant::now();
        s.start(t0).unwrap();

        assert!(s.next_wakeup(t0).unwrap() <= Duration::from_millis(50));

        let events = s.poll(t0 + Duration::from_secs(1));
        let signed = events
            .iter()
            .any(|e| matches!(e, SessionEvent::AutoSign(Ok(_))));
        assert!(signed);
        assert!(!s.is_rolling());
        assert_eq!(s.stats().present, 1);
    }

    #[test]
    fn no_repeat_invariant_holds_through_a_session() {
        let names: Vec<(String, String)> = (1..=8)
            .map(|i| (i.to_string(), format!("S{i}")))
            .collect();
        let refs: Vec<(&str, &str)> = names
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        let mut s = session(&refs);
        let t0 = Instant::now();

        for _ in 0..8 {
            assert_eq!(s.start(t0).unwrap(), ToggleOutcome::Started);
            for _ in 0..5 {
                s.tick();
            }
            let before = s.pool().len();
            s.sign_at(at()).unwrap();
            assert_eq!(s.pool().len(), before - 1);
            assert_no_present_in_pool(&s);
        }

        assert_eq!(s.stats().present, 8);
        assert_eq!(s.start(t0).unwrap(), ToggleOutcome::AllPresent);
    }

    #[test]
    fn no_repeat_switch_is_saved_once_and_reports_write_errors() {
        let dir = std::env::temp_dir().join("rollcall_session_prefs");
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();

        let state = dir.join("app_state.json");
        let mut s = session(&[("1", "A"), ("2", "B")])
            .with_files(dir.join("cache.xlsx"), state.clone());
        s.set_no_repeat(false).unwrap();
        assert_eq!(std::fs::read_to_string(&state).unwrap(), r#"{"no_repeat":false}"#);

        // a plain file where the parent directory should be
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let mut s = session(&[("1", "A")]).with_files(dir.join("c.xlsx"), blocker.join("state.json"));
        assert!(s.set_no_repeat(false).is_err());
        assert!(!s.no_repeat());
        assert_eq!(s.pool().len(), 1);
    }

    #[test]
    fn import_clears_display_and_selection() {
        let mut s = session(&[("1", "A"), ("2", "B")]);
        s.select(&[1]).unwrap();
        s.last_shown = Some("1  A".into());

        s.use_roster(Roster::new(vec![StudentRecord::new("7", "Z")]));
        assert!(s.selection().is_empty());
        assert!(s.last_shown().is_none());
        assert_eq!(s.pool().indices(), &[0]);
    }
}
