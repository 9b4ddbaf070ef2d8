// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator traits
//!
//! The engine does not know where sites and massing come from. Hosts resolve
//! them from their own model dependencies and expose them through
//! [`InputSource`].

use crate::{EvaluationInput, MassingSolid, Site, VantageStreet};

/// Source of evaluation inputs
///
/// # Example
///
/// ```ignore
/// use daylight_model::InputSource;
///
/// fn describe(source: &dyn InputSource) {
///     match source.site() {
///         Some(site) => println!("site area {:.1}", site.area()),
///         None => println!("no site"),
///     }
///     println!("{} solids, {} streets", source.massing().len(), source.streets().len());
/// }
/// ```
pub trait InputSource: Send + Sync {
    /// The site to evaluate, if one could be resolved
    fn site(&self) -> Option<Site>;

    /// All massing solids; empty when none could be resolved
    fn massing(&self) -> Vec<MassingSolid>;

    /// Vantage streets to evaluate from
    fn streets(&self) -> Vec<VantageStreet>;
}

impl InputSource for EvaluationInput {
    /// Largest of the supplied sites
    fn site(&self) -> Option<Site> {
        Site::largest(self.sites.iter().cloned())
    }

    fn massing(&self) -> Vec<MassingSolid> {
        self.massing.clone()
    }

    fn streets(&self) -> Vec<VantageStreet> {
        self.streets.clone()
    }
}
