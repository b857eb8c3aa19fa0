// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod account;
pub mod tx;
pub mod budgets;
pub mod loans;
pub mod lendings;
pub mod savings;
pub mod reports;
pub mod exporter;
pub mod settings;
