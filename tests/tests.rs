#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use futures::executor::block_on;
    use price_tracker::hooks::use_query::{QueryState, QueryView};
    use price_tracker::models::{
        catalog::{Product, Supplier},
        credentials::{CredentialForm, CredentialMode, Credentials, Profile},
        draft::PriceDraft,
        error::{AppError, ValidationError},
        notice::{Notice, NoticeKind},
        prices::{NameRef, NewPrice, PriceHistory, PriceObservation, PriceRecord},
        session::{AuthEvent, AuthUser, Session, SessionState},
    };
    use price_tracker::services::{
        backend::{AuthBackend, StoreBackend},
        credentials::CredentialOutcome,
        query_cache::QueryKey,
        AppServices,
    };
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    // In-memory stand-in for the hosted auth service and store.
    #[derive(Default)]
    struct MemoryBackend {
        products: Vec<Product>,
        suppliers: Vec<Supplier>,
        prices: RefCell<Vec<PriceObservation>>,
        profiles: RefCell<Vec<Profile>>,
        session: RefCell<Option<Session>>,
        inserts: Cell<usize>,
        inserted_rows: RefCell<Vec<NewPrice>>,
        history_reads: Cell<usize>,
        product_reads: Cell<usize>,
        fail_get_session: Cell<bool>,
        fail_refresh: Cell<bool>,
        fail_sign_out: Cell<bool>,
        fail_profile: Cell<bool>,
        fail_insert: Cell<bool>,
        confirm_sign_up: Cell<bool>,
    }

    impl MemoryBackend {
        fn seeded() -> Self {
            Self {
                products: vec![
                    Product {
                        id: 1,
                        name: "Apples".into(),
                        unit: "kg".into(),
                    },
                    Product {
                        id: 2,
                        name: "Milk".into(),
                        unit: "litre".into(),
                    },
                ],
                suppliers: vec![Supplier {
                    id: 7,
                    name: "Acme Wholesale".into(),
                    contact_info: String::new(),
                }],
                ..Default::default()
            }
        }

        fn session_for(email: &str, expires_at: Option<chrono::DateTime<Utc>>) -> Session {
            Session {
                access_token: format!("access-{email}"),
                refresh_token: format!("refresh-{email}"),
                expires_at,
                user: AuthUser {
                    id: "user-1".into(),
                    email: Some(email.into()),
                },
            }
        }

        fn observation(&self, row: &NewPrice) -> PriceObservation {
            let id = self.prices.borrow().len() as i64 + 1;
            PriceObservation {
                id,
                product_id: row.product_id,
                supplier_id: row.supplier_id,
                price: row.price,
                recorded_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
                    + Duration::days(id),
            }
        }
    }

    impl AuthBackend for MemoryBackend {
        async fn get_session(&self) -> Result<Option<Session>, AppError> {
            if self.fail_get_session.get() {
                return Err(AppError::ApiError("Session storage unavailable".into()));
            }
            Ok(self.session.borrow().clone())
        }

        async fn refresh_session(&self, session: &Session) -> Result<Session, AppError> {
            if self.fail_refresh.get() {
                return Err(AppError::AuthError("Invalid Refresh Token".into()));
            }
            let mut fresh = session.clone();
            fresh.access_token = format!("{}-refreshed", session.access_token);
            fresh.expires_at = Some(Utc::now() + Duration::hours(1));
            *self.session.borrow_mut() = Some(fresh.clone());
            Ok(fresh)
        }

        async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AppError> {
            if credentials.password != "correct horse" {
                return Err(AppError::AuthError("Invalid login credentials".into()));
            }
            let session = Self::session_for(&credentials.email, None);
            *self.session.borrow_mut() = Some(session.clone());
            Ok(session)
        }

        async fn sign_up(
            &self,
            credentials: &Credentials,
            _metadata: &Profile,
        ) -> Result<Option<Session>, AppError> {
            if !self.confirm_sign_up.get() {
                return Ok(None);
            }
            let session = Self::session_for(&credentials.email, None);
            *self.session.borrow_mut() = Some(session.clone());
            Ok(Some(session))
        }

        async fn sign_out(&self) -> Result<(), AppError> {
            if self.fail_sign_out.get() {
                return Err(AppError::ApiError("Network unreachable".into()));
            }
            self.session.borrow_mut().take();
            Ok(())
        }
    }

    impl StoreBackend for MemoryBackend {
        async fn select_products(&self) -> Result<Vec<Product>, AppError> {
            self.product_reads.set(self.product_reads.get() + 1);
            Ok(self.products.clone())
        }

        async fn select_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
            Ok(self.suppliers.clone())
        }

        async fn select_price_history(&self) -> Result<Vec<PriceRecord>, AppError> {
            self.history_reads.set(self.history_reads.get() + 1);
            let name_of = |id: i64, names: &[(i64, &str)]| {
                names
                    .iter()
                    .find(|(i, _)| *i == id)
                    .map(|(_, n)| NameRef { name: n.to_string() })
            };
            let products: Vec<(i64, &str)> =
                self.products.iter().map(|p| (p.id, p.name.as_str())).collect();
            let suppliers: Vec<(i64, &str)> =
                self.suppliers.iter().map(|s| (s.id, s.name.as_str())).collect();

            Ok(self
                .prices
                .borrow()
                .iter()
                .map(|o| PriceRecord {
                    observation: o.clone(),
                    products: name_of(o.product_id, &products),
                    suppliers: name_of(o.supplier_id, &suppliers),
                })
                .collect())
        }

        async fn insert_price(&self, row: &NewPrice) -> Result<Vec<PriceObservation>, AppError> {
            self.inserts.set(self.inserts.get() + 1);
            self.inserted_rows.borrow_mut().push(row.clone());
            if self.fail_insert.get() {
                return Err(AppError::ApiError(
                    "insert or update on table \"prices\" violates foreign key constraint".into(),
                ));
            }
            let created = self.observation(row);
            self.prices.borrow_mut().push(created.clone());
            Ok(vec![created])
        }

        async fn insert_profile(&self, row: &Profile) -> Result<(), AppError> {
            if self.fail_profile.get() {
                return Err(AppError::ApiError("permission denied for table profiles".into()));
            }
            self.profiles.borrow_mut().push(row.clone());
            Ok(())
        }
    }

    fn services() -> (Rc<MemoryBackend>, AppServices<MemoryBackend>) {
        let backend = Rc::new(MemoryBackend::seeded());
        let services = AppServices::new(backend.clone());
        (backend, services)
    }

    fn sign_up_form() -> CredentialForm {
        CredentialForm {
            id: "EMP-042".into(),
            name: "Dana Reyes".into(),
            email: "dana@example.com".into(),
            market: "Real Estate".into(),
            password: "correct horse".into(),
        }
    }

    // ===== Price Recorder Tests =====

    #[test]
    fn test_missing_information_never_reaches_store() {
        let (backend, services) = services();
        let draft = PriceDraft::new("1", "", "2.50");

        let err = block_on(services.recorder.submit(&draft)).unwrap_err();

        assert_eq!(err, AppError::Validation(ValidationError::MissingInformation));
        assert_eq!(backend.inserts.get(), 0);
        assert_eq!(services.cache().invalidations(QueryKey::PriceTrends), 0);
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let (backend, services) = services();

        for price in ["0", "-3", "abc", "NaN"] {
            let draft = PriceDraft::new("1", "7", price);
            let err = block_on(services.recorder.submit(&draft)).unwrap_err();
            assert_eq!(err, AppError::Validation(ValidationError::InvalidPrice), "{price}");
        }
        assert_eq!(backend.inserts.get(), 0);
    }

    #[test]
    fn test_valid_submission_refreshes_history() {
        let (backend, services) = services();

        let before = block_on(services.queries.price_history()).unwrap();
        assert!(before.is_empty());
        assert_eq!(backend.history_reads.get(), 1);

        let draft = PriceDraft::new("1", "7", "2.50");
        let created = block_on(services.recorder.submit(&draft)).unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].product_id, 1);
        assert_eq!(created[0].supplier_id, 7);
        assert_eq!(created[0].price, 2.5);
        assert_eq!(backend.inserts.get(), 1);
        assert_eq!(services.cache().invalidations(QueryKey::PriceTrends), 1);
        assert_eq!(services.cache().invalidations(QueryKey::Products), 0);

        let after = block_on(services.queries.price_history()).unwrap();
        assert_eq!(backend.history_reads.get(), 2);
        assert_eq!(after.len(), 1);
        assert_eq!(after.records()[0].product_name(), Some("Apples"));
        assert_eq!(after.records()[0].supplier_name(), Some("Acme Wholesale"));
    }

    #[test]
    fn test_successful_submission_resets_draft() {
        let (backend, services) = services();
        let mut draft = PriceDraft::new("1", "2", "19.99");

        block_on(services.recorder.submit_draft(&mut draft)).unwrap();

        assert_eq!(draft, PriceDraft::new("", "", ""));
        assert_eq!(
            *backend.inserted_rows.borrow(),
            vec![NewPrice {
                product_id: 1,
                supplier_id: 2,
                price: 19.99,
            }]
        );
    }

    #[test]
    fn test_failed_submission_keeps_draft() {
        let (backend, services) = services();
        backend.fail_insert.set(true);
        let mut draft = PriceDraft::new("1", "2", "19.99");

        let err = block_on(services.recorder.submit_draft(&mut draft)).unwrap_err();

        assert!(matches!(err, AppError::ApiError(_)));
        assert_eq!(draft, PriceDraft::new("1", "2", "19.99"));
        assert_eq!(backend.inserts.get(), 1);

        let mut invalid = PriceDraft::new("1", "2", "0");
        let err = block_on(services.recorder.submit_draft(&mut invalid)).unwrap_err();
        assert_eq!(err, AppError::Validation(ValidationError::InvalidPrice));
        assert_eq!(invalid, PriceDraft::new("1", "2", "0"));
        assert_eq!(backend.inserts.get(), 1);
    }

    #[test]
    fn test_store_failure_keeps_cache_and_surfaces_message() {
        let (backend, services) = services();
        backend.fail_insert.set(true);

        let err = block_on(services.recorder.submit(&PriceDraft::new("1", "99", "4.00")))
            .unwrap_err();

        assert_eq!(
            Notice::from(&err).description,
            "insert or update on table \"prices\" violates foreign key constraint"
        );
        assert_eq!(services.cache().invalidations(QueryKey::PriceTrends), 0);
        assert!(!services.recorder.is_submitting());
    }

    // ===== Reader Tests =====

    #[test]
    fn test_repeated_reads_share_one_request() {
        let (backend, services) = services();

        let first = block_on(services.queries.products()).unwrap();
        let second = block_on(services.queries.products()).unwrap();

        assert_eq!(backend.product_reads.get(), 1);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first[0].label(), "Apples (kg)");
    }

    #[test]
    fn test_recent_view_of_twelve_observations() {
        let (backend, services) = services();
        for n in 1..=12 {
            let draft = PriceDraft::new("2", "7", format!("{n}.5"));
            block_on(services.recorder.submit(&draft)).unwrap();
        }
        assert_eq!(backend.inserts.get(), 12);

        let history = block_on(services.queries.price_history()).unwrap();
        let recent = history.recent_records_in(&Utc);

        let ids: Vec<i64> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
        assert_eq!(recent[0].price, "12.50");
        assert_eq!(recent[0].product, "Milk");
        assert_eq!(recent[0].date, "3/13/2024");
        assert_eq!(history.time_series_in(&Utc).len(), 12);
    }

    #[test]
    fn test_history_without_names_uses_placeholders() {
        let history = PriceHistory::new(vec![PriceRecord {
            observation: PriceObservation {
                id: 1,
                product_id: 5,
                supplier_id: 6,
                price: 3.0,
                recorded_at: Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap(),
            },
            products: None,
            suppliers: None,
        }]);

        let point = &history.time_series_in(&Utc)[0];
        assert_eq!(point.product, "Unknown Product");
        assert_eq!(point.supplier, "Unknown Supplier");

        let recent = &history.recent_records_in(&Utc)[0];
        assert_eq!(recent.product, "N/A");
        assert_eq!(recent.supplier, "N/A");
        assert_eq!(recent.price, "3.00");
    }

    // ===== Credential Form Tests =====

    #[test]
    fn test_sign_up_survives_profile_failure() {
        let (backend, services) = services();
        backend.fail_profile.set(true);
        backend.confirm_sign_up.set(true);

        let outcome = block_on(services.credentials.submit(
            &services.session,
            backend.as_ref(),
            CredentialMode::SignUp,
            &sign_up_form(),
        ))
        .unwrap();

        assert_eq!(
            outcome,
            CredentialOutcome::AccountCreated {
                confirmed: true,
                profile_saved: false,
            }
        );
        assert_eq!(outcome.notice().kind, NoticeKind::Success);
        assert_eq!(outcome.notice().title, "Account Created");
        assert!(services.session.state().is_authenticated());
    }

    #[test]
    fn test_sign_up_saves_profile_with_lowercased_market() {
        let (backend, services) = services();

        let outcome = block_on(services.credentials.submit(
            &services.session,
            backend.as_ref(),
            CredentialMode::SignUp,
            &sign_up_form(),
        ))
        .unwrap();

        assert_eq!(
            outcome,
            CredentialOutcome::AccountCreated {
                confirmed: false,
                profile_saved: true,
            }
        );
        let profiles = backend.profiles.borrow();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "EMP-042");
        assert_eq!(profiles[0].market, "real estate");
        assert!(!services.session.state().is_authenticated());
    }

    #[test]
    fn test_sign_in_success_and_failure() {
        let (backend, services) = services();
        let mut form = CredentialForm {
            email: "dana@example.com".into(),
            password: "wrong".into(),
            ..Default::default()
        };

        let err = block_on(services.credentials.submit(
            &services.session,
            backend.as_ref(),
            CredentialMode::SignIn,
            &form,
        ))
        .unwrap_err();
        assert_eq!(Notice::from(&err).description, "Invalid login credentials");
        assert!(!services.session.state().is_authenticated());

        form.password = "correct horse".into();
        let outcome = block_on(services.credentials.submit(
            &services.session,
            backend.as_ref(),
            CredentialMode::SignIn,
            &form,
        ))
        .unwrap();

        assert_eq!(
            outcome.notice().description,
            "Welcome back, dana@example.com!"
        );
        assert!(services.session.state().is_authenticated());
    }

    #[test]
    fn test_blank_credentials_make_no_request() {
        let (backend, services) = services();
        let form = CredentialForm {
            email: "   ".into(),
            password: "correct horse".into(),
            ..Default::default()
        };

        let err = block_on(services.credentials.submit(
            &services.session,
            backend.as_ref(),
            CredentialMode::SignIn,
            &form,
        ))
        .unwrap_err();

        assert_eq!(err, AppError::Validation(ValidationError::MissingInformation));
        assert!(backend.session.borrow().is_none());
    }

    // ===== Session Provider Tests =====

    #[test]
    fn test_initial_state_is_loading() {
        let (_, services) = services();
        assert!(services.session.state().is_loading());
    }

    #[test]
    fn test_initialize_without_session_signs_out() {
        let (_, services) = services();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let _sub = services
            .session
            .subscribe(move |event, _| sink.borrow_mut().push(event));

        let state = block_on(services.session.initialize());

        assert_eq!(state, SessionState::SignedOut);
        assert_eq!(*events.borrow(), vec![AuthEvent::InitialSession]);
    }

    #[test]
    fn test_initialize_failure_resolves_to_signed_out() {
        let (backend, services) = services();
        backend.fail_get_session.set(true);

        let state = block_on(services.session.initialize());

        assert_eq!(state, SessionState::SignedOut);
        assert!(!services.session.state().is_loading());
    }

    #[test]
    fn test_initialize_refreshes_expired_session() {
        let (backend, services) = services();
        *backend.session.borrow_mut() = Some(MemoryBackend::session_for(
            "dana@example.com",
            Some(Utc::now() - Duration::minutes(5)),
        ));

        let state = block_on(services.session.initialize());

        let session = state.session().expect("refreshed session");
        assert_eq!(session.access_token, "access-dana@example.com-refreshed");
        assert!(services.session.refresh_due_in().is_some());
    }

    #[test]
    fn test_expired_session_that_cannot_refresh_signs_out() {
        let (backend, services) = services();
        backend.fail_refresh.set(true);
        *backend.session.borrow_mut() = Some(MemoryBackend::session_for(
            "dana@example.com",
            Some(Utc::now() - Duration::minutes(5)),
        ));

        assert_eq!(block_on(services.session.initialize()), SessionState::SignedOut);
    }

    #[test]
    fn test_logout_notifies_subscriber() {
        let (backend, services) = services();
        *backend.session.borrow_mut() = Some(MemoryBackend::session_for("dana@example.com", None));
        block_on(services.session.initialize());
        assert!(services.session.state().is_authenticated());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = services
            .session
            .subscribe(move |event, state| sink.borrow_mut().push((event, state.clone())));

        block_on(services.session.sign_out()).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![(AuthEvent::SignedOut, SessionState::SignedOut)]
        );
        assert_eq!(services.session.state(), SessionState::SignedOut);
    }

    #[test]
    fn test_failed_logout_keeps_session() {
        let (backend, services) = services();
        *backend.session.borrow_mut() = Some(MemoryBackend::session_for("dana@example.com", None));
        block_on(services.session.initialize());
        backend.fail_sign_out.set(true);

        let err = block_on(services.session.sign_out()).unwrap_err();

        assert_eq!(err.description(), "Network unreachable");
        assert!(services.session.state().is_authenticated());
    }

    #[test]
    fn test_dropped_subscription_stops_notifications() {
        let (_, services) = services();
        let count = Rc::new(Cell::new(0));

        let counter = count.clone();
        let sub = services
            .session
            .subscribe(move |_, _| counter.set(counter.get() + 1));
        assert_eq!(services.session.listener_count(), 1);

        block_on(services.session.initialize());
        assert_eq!(count.get(), 1);

        sub.unsubscribe();
        assert_eq!(services.session.listener_count(), 0);

        block_on(services.session.sign_out()).unwrap();
        assert_eq!(count.get(), 1);
    }

    // ===== Error and State Tests =====

    #[test]
    fn test_app_error_api_display() {
        let error = AppError::ApiError("Connection failed".to_string());
        assert_eq!(error.to_string(), "API error: Connection failed");
        assert_eq!(error.description(), "Connection failed");
    }

    #[test]
    fn test_validation_notice() {
        let notice = Notice::from(&AppError::from(ValidationError::InvalidPrice));
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.title, "Invalid price");
        assert_eq!(notice.description, "Please enter a valid price greater than 0");
    }

    #[test]
    fn test_query_state_views() {
        let loading: QueryState<Vec<Product>> = QueryState::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.view(), QueryView::Loading);

        let failed: QueryState<Vec<Product>> = QueryState::Error("boom".into());
        assert_eq!(failed.view(), QueryView::Error("boom"));
        assert!(failed.data().is_none());

        let empty: QueryState<Vec<Product>> = QueryState::Loaded(Rc::new(Vec::new()));
        assert_eq!(empty.view(), QueryView::Empty);

        let products = Rc::new(MemoryBackend::seeded().products);
        let loaded = QueryState::Loaded(products.clone());
        assert_eq!(loaded.view(), QueryView::Ready(&products));
        assert_eq!(loaded.data(), Some(&products));
    }
}
