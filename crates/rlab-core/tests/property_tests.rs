//! Property tests for filtering, store round trips and the gate
//!
use proptest::prelude::*;
use rlab_core::{
    filter_entries, Criteria, Entry, EntryDraft, EntryStore, EntryType, Facet, Gate, GateError,
    ImpactLevel, MutationIntent, SeedData, Status,
};
use rlab_test_utils::fixed_date;

fn entry_type() -> impl Strategy<Value = EntryType> {
    proptest::sample::select(EntryType::ALL.to_vec())
}

fn status() -> impl Strategy<Value = Status> {
    proptest::sample::select(Status::ALL.to_vec())
}

fn impact() -> impl Strategy<Value = ImpactLevel> {
    proptest::sample::select(ImpactLevel::ALL.to_vec())
}

fn facet<T: Clone + std::fmt::Debug + 'static>(
    inner: impl Strategy<Value = T> + 'static,
) -> impl Strategy<Value = Facet<T>> {
    prop_oneof![Just(Facet::Any), inner.prop_map(Facet::Only)]
}

fn draft() -> impl Strategy<Value = EntryDraft> {
    (
        "[a-zA-Z]{1,12}",
        "[a-zA-Z ]{0,20}[a-z]",
        "[a-zA-Z]{0,8}",
        entry_type(),
        status(),
        impact(),
        proptest::collection::vec("[a-zA-Z]{1,6}", 0..4),
        proptest::sample::select(vec!["foundations", "ideas", "metrics", "nowhere"]),
    )
        .prop_map(|(title, notes, source, t, s, i, tags, column)| {
            let mut draft = EntryDraft::new(title, notes)
                .with_source(source)
                .with_type(t)
                .with_status(s)
                .with_impact(i)
                .with_column(column);
            for tag in &tags {
                draft.tags.insert(tag);
            }
            draft
        })
}

fn criteria() -> impl Strategy<Value = Criteria> {
    (
        prop_oneof![Just(String::new()), "[a-zA-Z]{1,3}"],
        facet(entry_type()),
        facet(status()),
        facet(impact()),
    )
        .prop_map(|(search, entry_type, status, impact)| Criteria {
            search,
            entry_type,
            status,
            impact,
        })
}

fn store_with(drafts: Vec<EntryDraft>) -> EntryStore {
    let mut store = EntryStore::from_seed(SeedData::empty()).unwrap();
    for d in drafts {
        store.add_dated(d, fixed_date()).unwrap();
    }
    store
}

fn predicate_holds(c: &Criteria, e: &Entry) -> bool {
    let needle = c.search.to_lowercase();
    let search = c.search.is_empty()
        || e.title.to_lowercase().contains(&needle)
        || e.notes.to_lowercase().contains(&needle)
        || e.source.to_lowercase().contains(&needle)
        || e.tags.iter().any(|t| t.to_lowercase().contains(&needle));
    search
        && c.entry_type.admits(&e.entry_type)
        && c.status.admits(&e.status)
        && c.impact.admits(&e.impact_level)
}

proptest! {
    #[test]
    fn prop_filter_is_ordered_subset_satisfying_predicates(
        drafts in proptest::collection::vec(draft(), 0..20),
        c in criteria(),
    ) {
        let store = store_with(drafts);
        let all = store.all();
        let visible = filter_entries(all, &c);

        // order-preserving subsequence
        let mut cursor = 0;
        for v in &visible {
            let pos = all[cursor..].iter().position(|e| e.id == v.id);
            prop_assert!(pos.is_some());
            cursor += pos.unwrap_or(0) + 1;
        }
        prop_assert!(visible.iter().all(|e| predicate_holds(&c, e)));

        let expected = all.iter().filter(|e| predicate_holds(&c, e)).count();
        prop_assert_eq!(visible.len(), expected);
    }

    #[test]
    fn prop_default_criteria_is_identity(drafts in proptest::collection::vec(draft(), 0..20)) {
        let store = store_with(drafts);
        let visible: Vec<Entry> = filter_entries(store.all(), &Criteria::default())
            .into_iter()
            .cloned()
            .collect();
        prop_assert_eq!(visible.as_slice(), store.all());
    }

    #[test]
    fn prop_sequential_filtering_equals_combined(
        drafts in proptest::collection::vec(draft(), 0..20),
        search in prop_oneof![Just(String::new()), "[a-z]{1,2}"],
        t in facet(entry_type()),
        s in facet(status()),
        i in facet(impact()),
    ) {
        let store = store_with(drafts);
        let first = Criteria { search: search.clone(), entry_type: t, ..Criteria::default() };
        let second = Criteria { status: s, impact: i, ..Criteria::default() };
        let combined = Criteria { search, entry_type: t, status: s, impact: i };

        let stage: Vec<Entry> = filter_entries(store.all(), &first).into_iter().cloned().collect();
        let sequential: Vec<Entry> = filter_entries(&stage, &second).into_iter().cloned().collect();
        let direct: Vec<Entry> = filter_entries(store.all(), &combined).into_iter().cloned().collect();
        prop_assert_eq!(sequential, direct);
    }

    #[test]
    fn prop_add_then_remove_restores_store(
        drafts in proptest::collection::vec(draft(), 0..10),
        candidate in draft(),
    ) {
        let mut store = store_with(drafts);
        let before = store.all().to_vec();

        let added = store.add(candidate).unwrap();
        prop_assert_eq!(store.len(), before.len() + 1);
        store.remove(&added.id);

        prop_assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn prop_wrong_passcode_never_approves(attempt in ".{0,12}") {
        prop_assume!(attempt != "DELETE");
        let mut gate = Gate::default();
        gate.request(MutationIntent::Delete("3".into()));
        gate.input(attempt);

        prop_assert_eq!(gate.submit(), Err(GateError::IncorrectPasscode));
        prop_assert!(gate.is_open());
        prop_assert_eq!(gate.current_input(), "");
    }
}
