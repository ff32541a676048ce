/*!
# vag2inv DevKit - Stubs and utilities for development

Library for developing and testing vag2inv without a real Vagrant project:
- Mock `vagrant` runner with scripted output
- Builders for canned status / ssh-config / ifconfig text
- End-to-end harness writing real inventory files into a temp directory
*/

pub mod fixtures;
pub mod test_utils;
pub mod vagrant_stub;

pub use fixtures::{ifconfig_output, SshConfigBuilder, SshHost, StatusBuilder};
pub use test_utils::TestHarness;
pub use vagrant_stub::MockVagrant;
