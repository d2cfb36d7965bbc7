// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat state read from the vendor.
//!
//! [`DeviceState`] merges the thermostat info and gateway dead-band replies
//! into one immutable snapshot used for a single directive.

mod device_state;

pub use device_state::DeviceState;
