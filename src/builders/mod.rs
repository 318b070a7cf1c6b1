// This file is the module declaration file for the `builders` module.
// It declares and makes public all the sub-modules within the `src/builders`
// directory. These modules encapsulate the pieces that surround the core
// validation engine.

// The `pub mod hooks;` declaration exposes the `hooks` module.
//
// `hooks` module:
// This module contains all the logic related to repository hooks. It is
// responsible for installing the `pre-commit` hook script into a
// repository's `hooks` directory, backing up any foreign hook already
// there and keeping reinstallation idempotent.
pub mod hooks;

// The `pub mod reporter;` declaration exposes the `reporter` module.
//
// `reporter` module:
// This module is responsible for rendering the validation verdict. It
// defines a `DecisionReporter` trait with a `ConsoleReporter`
// implementation (banner-delimited diagnostics on stderr, the stream
// Subversion shows to the committing client) and a `JsonReporter` for
// tooling that wraps the guard.
pub mod reporter;
