use log::debug;
use serde::Serialize;

use crate::backend::LedgerStore;
use crate::core::{Ledger, ShareTable, Transaction, Totals, ActivityBreakdown, ValidationError};

pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Read projections handed to the presentation layer after each mutation.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub breakdown: ActivityBreakdown,
    pub recent: Vec<Transaction>
}

impl Dashboard {
    pub fn of(ledger: &Ledger, recent_limit: usize) -> Dashboard {
        Dashboard {
            totals: ledger.totals(),
            breakdown: ledger.activity_breakdown(),
            recent: ledger.recent_transactions(recent_limit).into_iter().cloned().collect()
        }
    }

    /// Individual earnings and community fund, in that order.
    pub fn distribution(&self) -> [(&'static str, f64); 2] {
        [
            ("Individual Earnings", self.totals.total_individual_earnings),
            ("Community Fund", self.totals.total_community_fund)
        ]
    }
}

/// Tells the user their input was rejected.
pub trait Notifier {
    fn notify(&self, error: &ValidationError);
}

/// Draws the dashboard.
pub trait Renderer {
    fn render(&self, dashboard: &Dashboard);
}

/// Discards everything it is given.
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _error: &ValidationError) {}
}

impl Renderer for Silent {
    fn render(&self, _dashboard: &Dashboard) {}
}

/// A ledger bound to its store and presentation collaborators.
pub struct Session<S: LedgerStore, N: Notifier, R: Renderer> {
    ledger: Ledger,
    store: S,
    notifier: N,
    renderer: R,
    recent_limit: usize
}

impl<S: LedgerStore, N: Notifier, R: Renderer> Session<S, N, R> {
    /// Loads the persisted ledger, starting empty when there is none usable.
    pub fn open(share_table: ShareTable, store: S, notifier: N, renderer: R) -> Self {
        let ledger = match store.load() {
            Some(transactions) => Ledger::from_transactions(share_table, transactions),
            None => {
                debug!("starting with an empty ledger");
                Ledger::new(share_table)
            }
        };
        Session { ledger, store, notifier, renderer, recent_limit: DEFAULT_RECENT_LIMIT }
    }

    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Handles one form submission.
    pub fn submit(&mut self, activity: &str, amount: &str, beneficiary: &str) -> Result<Transaction, ValidationError> {
        let transaction = match self.ledger.add_raw(activity, amount, beneficiary) {
            Ok(transaction) => transaction.clone(),
            Err(err) => {
                self.notifier.notify(&err);
                return Err(err);
            }
        };

        self.store.save(self.ledger.transactions());
        self.renderer.render(&self.dashboard());
        Ok(transaction)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::of(&self.ledger, self.recent_limit)
    }
}


#[cfg(test)]
mod tests {
    use super::{Dashboard, Notifier, Renderer, Session, Silent};
    use crate::backend::{JsonStore, KeyValueStore, LedgerStore, MemoryKeyValueStore, BackendError};
    use crate::core::{ShareTable, ValidationError};

    use std::cell::RefCell;
    use rstest::{fixture, rstest};

    #[derive(Default)]
    struct Recorder {
        errors: RefCell<Vec<String>>,
        dashboards: RefCell<Vec<Dashboard>>
    }

    impl Notifier for Recorder {
        fn notify(&self, error: &ValidationError) {
            self.errors.borrow_mut().push(error.to_string());
        }
    }

    impl Renderer for Recorder {
        fn render(&self, dashboard: &Dashboard) {
            self.dashboards.borrow_mut().push(dashboard.clone());
        }
    }

    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn get(&self, _key: &str) -> crate::backend::Result<Option<String>> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: &str) -> crate::backend::Result<()> {
            Err(BackendError::Io(std::io::Error::new(std::io::ErrorKind::Other, "read-only")))
        }
    }

    type TestSession = Session<JsonStore<MemoryKeyValueStore>, Recorder, Recorder>;

    #[fixture]
    fn session() -> TestSession {
        Session::open(ShareTable::default(), JsonStore::new(MemoryKeyValueStore::new()),
            Recorder::default(), Recorder::default())
    }

    #[rstest]
    fn submit_saves_and_renders(mut session: TestSession) {
        let t = session.submit("guided-tour", "2000", "Alice").unwrap();
        assert_eq!(t.individual_share, 1400.0);
        assert_eq!(t.community_share, 600.0);

        assert_eq!(session.store().load().unwrap(), session.ledger().transactions());

        let dashboards = session.renderer().dashboards.borrow();
        assert_eq!(dashboards.len(), 1);
        assert_eq!(dashboards[0].totals.total_revenue, 2000.0);
        assert_eq!(dashboards[0].breakdown.labels(), vec!["Guided Tour"]);
        assert_eq!(dashboards[0].recent, vec![t]);
        assert!(session.notifier().errors.borrow().is_empty());
    }

    #[rstest]
    #[case("food", "", "Asha", "invalid amount")]
    #[case("food", "-1", "Asha", "invalid amount")]
    #[case("food", "12", "  ", "missing beneficiary")]
    #[case("fishing", "12", "Asha", "unknown activity type: fishing")]
    fn rejected_input_notifies(mut session: TestSession, #[case] activity: &str,
                               #[case] amount: &str, #[case] beneficiary: &str, #[case] message: &str) {
        let res = session.submit(activity, amount, beneficiary);
        assert!(res.is_err());

        assert_eq!(*session.notifier().errors.borrow(), vec![message.to_owned()]);
        assert!(session.renderer().dashboards.borrow().is_empty());
        assert!(session.ledger().is_empty());
        assert!(session.store().load().is_none());
    }

    #[rstest]
    fn reopen_restores_ledger(mut session: TestSession) {
        session.submit("homestay", "1000", "Asha").unwrap();
        session.submit("food", "500", "Ravi").unwrap();

        let raw = session.store().backend().get("revenueData").unwrap().unwrap();
        let backend = MemoryKeyValueStore::new();
        backend.put("revenueData", &raw).unwrap();

        let mut reopened = Session::open(ShareTable::default(), JsonStore::new(backend), Silent, Silent);
        assert_eq!(reopened.ledger().transactions(), session.ledger().transactions());

        let breakdown = reopened.dashboard().breakdown;
        assert_eq!(breakdown.labels(), vec!["Homestay", "Local Cuisine"]);
        assert_eq!(breakdown.values(), vec![1000.0, 500.0]);

        let t = reopened.submit("food", "1", "Ravi").unwrap();
        assert_eq!(t.id, 3);
    }

    #[test]
    fn reopen_skips_record_with_last_id() {
        let backend = MemoryKeyValueStore::new();
        backend.put("revenueData", r#"[{"id": 18446744073709551615, "date": "2024-01-01",
            "activityType": "food", "amount": 100.0, "beneficiary": "Asha",
            "individualShare": 65.0, "communityShare": 35.0}]"#).unwrap();

        let mut session = Session::open(ShareTable::default(), JsonStore::new(backend), Silent, Silent);
        assert!(session.ledger().is_empty());

        let t = session.submit("food", "10", "Asha").unwrap();
        assert_eq!(t.id, 1);
    }

    #[test]
    fn failed_save_keeps_transaction() {
        let mut session = Session::open(ShareTable::default(), JsonStore::new(ReadOnly), Silent, Silent);
        session.submit("handicraft", "100", "Bob").unwrap();
        session.submit("handicraft", "50", "Bob").unwrap();

        assert_eq!(session.ledger().len(), 2);
        assert_eq!(session.dashboard().totals.total_revenue, 150.0);
    }

    #[test]
    fn recent_limit_applies() {
        let mut session = Session::open(ShareTable::default(), JsonStore::new(MemoryKeyValueStore::new()),
            Silent, Silent).with_recent_limit(3);
        for i in 1..=5 {
            session.submit("food", &i.to_string(), "Asha").unwrap();
        }

        let amounts: Vec<_> = session.dashboard().recent.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![5.0, 4.0, 3.0]);
    }

    #[rstest]
    fn distribution_matches_totals(mut session: TestSession) {
        session.submit("handicraft", "100", "Bob").unwrap();
        let dashboard = session.dashboard();
        assert_eq!(dashboard.distribution(), [("Individual Earnings", 80.0), ("Community Fund", 20.0)]);
    }
}
