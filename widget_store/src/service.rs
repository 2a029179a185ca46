// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `WidgetService`: validation and z-index orchestration over a store.

use widget_index::{IndexError, Page, PageRequest, Rect, Widget, WidgetId};

use crate::error::StoreError;
use crate::params::WidgetParams;
use crate::store::WidgetStore;
use crate::view::WidgetView;

/// Widget operations as exposed to callers.
///
/// Every mutating call runs in one write transaction, so readers never see
/// a shift without the save that caused it.
#[derive(Debug, Default)]
pub struct WidgetService {
    store: WidgetStore,
}

impl WidgetService {
    /// A service over a fresh default store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A service over `store`.
    pub fn with_store(store: WidgetStore) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &WidgetStore {
        &self.store
    }

    /// Create a widget.
    ///
    /// Without a z-index the widget goes on top (`max + 1`). With one, any
    /// widget already there is pushed up along with its contiguous run.
    pub fn create(&self, params: WidgetParams) -> Result<WidgetView, StoreError> {
        params.validate()?;
        let mut txn = self.store.write();
        let z = match params.z_index {
            Some(z) => {
                if txn.needs_shift(z) {
                    txn.shift_upwards(z)?;
                }
                z
            }
            None => {
                let max = txn.max_index();
                max.checked_add(1).ok_or(IndexError::ZIndexOverflow(max))?
            }
        };
        let widget = self.store.create_entity(&params.at_z(z));
        let view = WidgetView::from(&widget);
        tracing::debug!(id = %widget.id(), z, "created widget");
        txn.save(widget);
        Ok(view)
    }

    /// The widget with this id, if any.
    pub fn get(&self, id: &WidgetId) -> Option<WidgetView> {
        self.store.find_by_id(id).map(WidgetView::from)
    }

    /// Replace a widget's geometry and, optionally, its z-index.
    ///
    /// Returns `Ok(None)` if the id is unknown. On error nothing changes.
    pub fn update(
        &self,
        id: &WidgetId,
        params: WidgetParams,
    ) -> Result<Option<WidgetView>, StoreError> {
        params.validate()?;
        let mut txn = self.store.write();
        let Some(current) = txn.find_by_id(id).cloned() else {
            return Ok(None);
        };
        let z = params.z_index.unwrap_or(current.z_index);
        let moving = z != current.z_index;
        if moving {
            txn.delete_by_id(id);
        }
        if txn.needs_shift_for(z, id)
            && let Err(err) = txn.shift_upwards(z)
        {
            if moving {
                txn.save(current);
            }
            return Err(err.into());
        }

        let mut updated = Widget::new(
            id.clone(),
            params.x,
            params.y,
            z,
            params.width,
            params.height,
            current.updated_at,
        );
        updated.touch(txn.now());
        let view = WidgetView::from(&updated);
        tracing::debug!(%id, from = current.z_index, to = z, "updated widget");
        txn.save(updated);
        Ok(Some(view))
    }

    /// Delete a widget. Returns false if the id is unknown.
    pub fn delete(&self, id: &WidgetId) -> bool {
        self.store.delete_by_id(id)
    }

    /// Every widget, bottom-most first.
    pub fn list(&self) -> Vec<WidgetView> {
        self.store.find_all().iter().map(WidgetView::from).collect()
    }

    /// Page `page` with the configured default size.
    pub fn default_page(&self, page: usize) -> PageRequest {
        PageRequest::new(page, self.store.config().default_page_size)
    }

    /// One page of [`WidgetService::list`].
    pub fn list_page(&self, request: PageRequest) -> Result<Page<WidgetView>, StoreError> {
        self.check_page(request)?;
        Ok(self.store.find_all_paged(request).map(WidgetView::from))
    }

    /// Widgets lying fully inside `query`, paginated.
    pub fn filter(
        &self,
        request: PageRequest,
        query: &Rect,
    ) -> Result<Page<WidgetView>, StoreError> {
        self.check_page(request)?;
        Ok(self.store.filter(request, query).map(WidgetView::from))
    }

    fn check_page(&self, request: PageRequest) -> Result<(), StoreError> {
        let max = self.store.config().max_page_size;
        if (1..=max).contains(&request.size) {
            Ok(())
        } else {
            Err(StoreError::PageSize {
                size: request.size,
                max,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn create_at(svc: &WidgetService, z: i32) -> WidgetView {
        svc.create(WidgetParams::new(0, 0, 10, 10).at_z(z)).unwrap()
    }

    fn ids_and_zs(svc: &WidgetService) -> Vec<(String, i32)> {
        svc.list().into_iter().map(|v| (v.id, v.z_index)).collect()
    }

    fn zs(svc: &WidgetService) -> Vec<i32> {
        svc.list().iter().map(|v| v.z_index).collect()
    }

    #[test]
    fn create_without_z_goes_on_top() {
        let svc = WidgetService::new();
        assert_eq!(svc.create(WidgetParams::new(0, 0, 1, 1)).unwrap().z_index, 1);
        create_at(&svc, 40);
        assert_eq!(svc.create(WidgetParams::new(0, 0, 1, 1)).unwrap().z_index, 41);
    }

    #[test]
    fn create_on_top_of_max_key_overflows_cleanly() {
        let svc = WidgetService::new();
        create_at(&svc, i32::MAX);
        let err = svc.create(WidgetParams::new(0, 0, 1, 1)).unwrap_err();
        assert!(matches!(err, StoreError::Index(IndexError::ZIndexOverflow(_))));
        assert_eq!(svc.store().count(), 1);
    }

    #[test]
    fn create_rejects_bad_dimensions() {
        let svc = WidgetService::new();
        assert!(svc.create(WidgetParams::new(0, 0, 0, 5)).is_err());
        assert!(svc.create(WidgetParams::new(0, 0, 5, -1)).is_err());
        assert_eq!(svc.store().count(), 0);
    }

    #[test]
    fn duplicate_z_scenario() {
        let svc = WidgetService::new();
        let a = create_at(&svc, -10);
        let b = create_at(&svc, -20);
        let c = create_at(&svc, -20);
        let d = create_at(&svc, 30);
        let order = ids_and_zs(&svc);
        assert_eq!(order, [(c.id, -20), (b.id, -19), (a.id, -10), (d.id, 30)]);
    }

    #[test]
    fn insert_stops_at_gap() {
        let svc = WidgetService::new();
        for z in [100, 101, 110, 120] {
            create_at(&svc, z);
        }
        let new = create_at(&svc, 100);
        assert_eq!(zs(&svc), [100, 101, 102, 110, 120]);
        assert_eq!(svc.list()[0].id, new.id);
    }

    #[test]
    fn update_geometry_keeps_z_and_refreshes_filter() {
        let svc = WidgetService::new();
        let w = create_at(&svc, 5);
        let id = WidgetId::new(w.id.clone());
        let updated = svc
            .update(&id, WidgetParams::new(200, 200, 20, 30))
            .unwrap()
            .unwrap();
        assert_eq!(updated.z_index, 5);
        assert_eq!((updated.width, updated.height), (20, 30));
        assert!(updated.updated_at >= w.updated_at);
        let near = svc.filter(PageRequest::new(0, 10), &Rect::new(0, 0, 50, 50)).unwrap();
        assert_eq!(near.total, 0);
        let far = svc.filter(PageRequest::new(0, 10), &Rect::new(200, 200, 220, 230)).unwrap();
        assert_eq!(far.total, 1);
        svc.store().verify().unwrap();
    }

    #[test]
    fn update_into_occupied_key_shifts_others_not_self() {
        let svc = WidgetService::new();
        let a = create_at(&svc, 1);
        let b = create_at(&svc, 2);
        let c = create_at(&svc, 3);
        let id = WidgetId::new(a.id.clone());
        svc.update(&id, WidgetParams::new(0, 0, 10, 10).at_z(2)).unwrap();
        let order = ids_and_zs(&svc);
        assert_eq!(order, [(a.id, 2), (b.id, 3), (c.id, 4)]);
        assert_eq!(svc.store().count(), 3);
        svc.store().verify().unwrap();
    }

    #[test]
    fn update_to_own_key_does_not_shift() {
        let svc = WidgetService::new();
        let a = create_at(&svc, 1);
        create_at(&svc, 2);
        let id = WidgetId::new(a.id);
        svc.update(&id, WidgetParams::new(3, 3, 10, 10).at_z(1)).unwrap();
        assert_eq!(zs(&svc), [1, 2]);
    }

    #[test]
    fn failed_update_restores_the_widget() {
        let svc = WidgetService::new();
        let a = create_at(&svc, 0);
        create_at(&svc, i32::MAX);
        let id = WidgetId::new(a.id.clone());
        let err = svc
            .update(&id, WidgetParams::new(0, 0, 10, 10).at_z(i32::MAX))
            .unwrap_err();
        assert!(matches!(err, StoreError::Index(IndexError::ZIndexOverflow(_))));
        assert_eq!(svc.get(&id), Some(a));
        svc.store().verify().unwrap();
    }

    #[test]
    fn update_unknown_id_is_none() {
        let svc = WidgetService::new();
        let got = svc.update(&"ghost".into(), WidgetParams::new(0, 0, 1, 1)).unwrap();
        assert!(got.is_none());
        assert_eq!(svc.store().count(), 0);
    }

    #[test]
    fn delete_and_get() {
        let svc = WidgetService::new();
        let w = create_at(&svc, 1);
        let id = WidgetId::new(w.id.clone());
        assert_eq!(svc.get(&id), Some(w));
        assert!(svc.delete(&id));
        assert!(!svc.delete(&id));
        assert!(svc.get(&id).is_none());
    }

    #[test]
    fn page_size_bounds_follow_config() {
        let config = StoreConfig {
            max_page_size: 3,
            default_page_size: 2,
            ..StoreConfig::default()
        };
        let svc = WidgetService::with_store(WidgetStore::with_config(config));
        for z in 0..5 {
            create_at(&svc, z);
        }
        let page = svc.list_page(svc.default_page(1)).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages(), 3);
        assert!(matches!(
            svc.list_page(PageRequest::new(0, 4)),
            Err(StoreError::PageSize { size: 4, max: 3 })
        ));
        assert!(matches!(
            svc.filter(PageRequest::new(0, 0), &Rect::new(0, 0, 1, 1)),
            Err(StoreError::PageSize { size: 0, .. })
        ));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Create(Option<i32>),
        Update(usize, Option<i32>),
        Delete(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            prop::option::of(-15_i32..15).prop_map(Op::Create),
            (any::<usize>(), prop::option::of(-15_i32..15))
                .prop_map(|(i, z)| Op::Update(i, z)),
            any::<usize>().prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn keys_and_ids_stay_unique(ops in prop::collection::vec(op(), 1..60)) {
            let svc = WidgetService::new();
            let mut live: Vec<WidgetId> = Vec::new();
            for op in ops {
                match op {
                    Op::Create(z) => {
                        let params = WidgetParams { z_index: z, ..WidgetParams::new(0, 0, 5, 5) };
                        live.push(WidgetId::new(svc.create(params).unwrap().id));
                    }
                    Op::Update(i, z) if !live.is_empty() => {
                        let id = &live[i % live.len()];
                        let params = WidgetParams { z_index: z, ..WidgetParams::new(1, 1, 5, 5) };
                        prop_assert!(svc.update(id, params).unwrap().is_some());
                    }
                    Op::Delete(i) if !live.is_empty() => {
                        let id = live.swap_remove(i % live.len());
                        prop_assert!(svc.delete(&id));
                    }
                    _ => {}
                }
                svc.store().verify().unwrap();
                let all = svc.list();
                prop_assert_eq!(all.len(), live.len());
                prop_assert!(all.windows(2).all(|p| p[0].z_index < p[1].z_index));
                let ids: BTreeSet<&str> = all.iter().map(|v| v.id.as_str()).collect();
                prop_assert_eq!(ids.len(), all.len());
            }
        }
    }
}
