// Copyright 2026 water-anomalies contributors
// SPDX-License-Identifier: MIT-0

mod macros;

mod anomaly_view;
mod fetch;
pub mod main;
