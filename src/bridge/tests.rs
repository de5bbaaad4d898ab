use super::*;
use crate::config::GmtConfig;
use crate::error::GmtError;
use crate::traits::GmtApi;
use crate::types::{DataFamily, DataGeometry, DataMode, DataVia, FamilySpec};

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::ffi::{c_char, c_int, c_uint, c_void, CStr};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

//==================================================================================
// Test Helpers: a recording stand-in for libgmt
//==================================================================================

#[derive(Debug, Clone, PartialEq)]
struct CreateDataCall {
    family: c_uint,
    geometry: c_uint,
    mode: c_uint,
    dim: Option<Vec<u64>>,
    range: Option<Vec<f64>>,
    inc: Option<Vec<f64>>,
    registration: c_uint,
    pad: c_int,
    data_is_null: bool,
}

/// Everything the fake records, plus the knobs tests turn to simulate failures.
#[derive(Default)]
struct FakeState {
    calls: RefCell<Vec<String>>,
    live_sessions: RefCell<HashSet<usize>>,
    sessions_created: Cell<usize>,
    log_destination: RefCell<Option<PathBuf>>,
    module_calls: RefCell<Vec<(String, String)>>,
    create_data_calls: RefCell<Vec<CreateDataCall>>,

    fail_create_session: Cell<bool>,
    destroy_status: Cell<c_int>,
    messages_status: Cell<c_int>,
    module_status: Cell<c_int>,
    module_log: RefCell<Option<Vec<u8>>>,
    log_becomes_directory: Cell<bool>,
    fail_create_data: Cell<bool>,
}

impl FakeState {
    fn calls_to(&self, symbol: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(symbol))
            .count()
    }
}

struct FakeApi {
    state: Rc<FakeState>,
    constants: HashMap<&'static str, c_int>,
}

impl FakeApi {
    fn new(state: Rc<FakeState>) -> Self {
        let constants = HashMap::from([
            ("GMT_SESSION_EXTERNAL", 2),
            ("GMT_PAD_DEFAULT", 2),
            ("GMT_MODULE_CMD", 0),
            ("GMT_LOG_ONCE", 1),
            ("GMT_IS_FILE", 0),
            ("GMT_GRID_NODE_REG", 0),
            ("GMT_IS_DATASET", 0),
            ("GMT_IS_GRID", 1),
            ("GMT_IS_PALETTE", 2),
            ("GMT_IS_MATRIX", 5),
            ("GMT_IS_VECTOR", 6),
            ("GMT_VIA_VECTOR", 100),
            ("GMT_VIA_MATRIX", 200),
            ("GMT_IS_NONE", 16),
            ("GMT_IS_POINT", 1),
            ("GMT_IS_LINE", 2),
            ("GMT_IS_POLYGON", 4),
            ("GMT_IS_PLP", 7),
            ("GMT_IS_SURFACE", 8),
            ("GMT_CONTAINER_ONLY", 1),
            ("GMT_OUTPUT", 1024),
        ]);
        Self { state, constants }
    }
}

impl GmtApi for FakeApi {
    unsafe fn create_session(&self, tag: &CStr, pad: c_uint, mode: c_uint) -> *mut c_void {
        self.state.calls.borrow_mut().push(format!(
            "GMT_Create_Session({}, {}, {})",
            tag.to_string_lossy(),
            pad,
            mode
        ));
        if self.state.fail_create_session.get() {
            return std::ptr::null_mut();
        }
        let n = self.state.sessions_created.get() + 1;
        self.state.sessions_created.set(n);
        let address = 0x1000 + n * 0x10;
        self.state.live_sessions.borrow_mut().insert(address);
        address as *mut c_void
    }

    unsafe fn destroy_session(&self, session: *mut c_void) -> c_int {
        self.state
            .calls
            .borrow_mut()
            .push(format!("GMT_Destroy_Session({:p})", session));
        self.state.live_sessions.borrow_mut().remove(&(session as usize));
        self.state.destroy_status.get()
    }

    unsafe fn get_enum(&self, name: &CStr) -> c_int {
        let name = name.to_string_lossy();
        self.state
            .calls
            .borrow_mut()
            .push(format!("GMT_Get_Enum({})", name));
        self.constants.get(&*name).copied().unwrap_or(-99999)
    }

    unsafe fn call_module(
        &self,
        session: *mut c_void,
        module: &CStr,
        _mode: c_int,
        args: *mut c_void,
    ) -> c_int {
        assert!(
            self.state.live_sessions.borrow().contains(&(session as usize)),
            "GMT_Call_Module received a dead session"
        );
        let module = module.to_string_lossy().to_string();
        let args = CStr::from_ptr(args as *const c_char)
            .to_string_lossy()
            .to_string();
        self.state
            .calls
            .borrow_mut()
            .push(format!("GMT_Call_Module({})", module));
        self.state.module_calls.borrow_mut().push((module, args));

        if let Some(text) = self.state.module_log.borrow().as_ref() {
            if let Some(dest) = self.state.log_destination.borrow().as_ref() {
                std::fs::write(dest, text).unwrap();
            }
        }
        if self.state.log_becomes_directory.get() {
            if let Some(dest) = self.state.log_destination.borrow().as_ref() {
                std::fs::remove_file(dest).unwrap();
                std::fs::create_dir(dest).unwrap();
            }
        }
        self.state.module_status.get()
    }

    unsafe fn create_data(
        &self,
        session: *mut c_void,
        family: c_uint,
        geometry: c_uint,
        mode: c_uint,
        dim: *const u64,
        range: *const f64,
        inc: *const f64,
        registration: c_uint,
        pad: c_int,
        data: *mut c_void,
    ) -> *mut c_void {
        assert!(self.state.live_sessions.borrow().contains(&(session as usize)));
        let read = |ptr: *const f64, n: usize| {
            (!ptr.is_null()).then(|| std::slice::from_raw_parts(ptr, n).to_vec())
        };
        self.state
            .calls
            .borrow_mut()
            .push("GMT_Create_Data".to_string());
        self.state.create_data_calls.borrow_mut().push(CreateDataCall {
            family,
            geometry,
            mode,
            dim: (!dim.is_null()).then(|| std::slice::from_raw_parts(dim, 4).to_vec()),
            range: read(range, 4),
            inc: read(inc, 2),
            registration,
            pad,
            data_is_null: data.is_null(),
        });
        if self.state.fail_create_data.get() {
            std::ptr::null_mut()
        } else {
            0xDA7A0 as *mut c_void
        }
    }

    unsafe fn handle_messages(
        &self,
        session: *mut c_void,
        mode: c_uint,
        method: c_uint,
        dest: *const c_char,
    ) -> c_int {
        assert!(self.state.live_sessions.borrow().contains(&(session as usize)));
        let dest = PathBuf::from(CStr::from_ptr(dest).to_string_lossy().to_string());
        self.state.calls.borrow_mut().push(format!(
            "GMT_Handle_Messages({}, {}, {})",
            mode,
            method,
            dest.display()
        ));
        *self.state.log_destination.borrow_mut() = Some(dest);
        self.state.messages_status.get()
    }
}

static NEXT_PREFIX: AtomicUsize = AtomicUsize::new(0);

/// A config whose log prefix no other test (or process) shares.
fn unique_config() -> GmtConfig {
    let n = NEXT_PREFIX.fetch_add(1, Ordering::SeqCst);
    GmtConfig {
        log_prefix: format!("gmt-test-{}-{}-", std::process::id(), n),
        ..Default::default()
    }
}

fn fake_lib() -> (LibGmt<FakeApi>, Rc<FakeState>) {
    let state = Rc::new(FakeState::default());
    let lib = LibGmt::with_api(FakeApi::new(state.clone()), unique_config());
    (lib, state)
}

fn open_fake_lib() -> (LibGmt<FakeApi>, Rc<FakeState>) {
    let (mut lib, state) = fake_lib();
    lib.begin().unwrap();
    state.calls.borrow_mut().clear();
    (lib, state)
}

/// Files in the temp directory that carry this binding's log prefix.
fn leftover_logs(config: &GmtConfig) -> Vec<PathBuf> {
    std::fs::read_dir(std::env::temp_dir())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().starts_with(&config.log_prefix))
                .unwrap_or(false)
        })
        .collect()
}

fn clib_message(err: GmtError) -> String {
    match err {
        GmtError::Clib(msg) => msg,
        other => panic!("Expected GmtError::Clib, got {:?}", other),
    }
}

//==================================================================================
// Session lifecycle
//==================================================================================

#[test]
fn test_no_session_before_begin() {
    let (lib, state) = fake_lib();
    assert!(!lib.is_open());
    assert!(matches!(lib.current_session(), Err(GmtError::NoSession)));
    assert!(state.calls.borrow().is_empty());
}

#[test]
fn test_begin_creates_external_session_with_configured_name() {
    let (mut lib, state) = fake_lib();
    lib.begin().unwrap();

    let session = lib.current_session().unwrap();
    assert_eq!(session.address(), 0x1010);
    assert!(state
        .calls
        .borrow()
        .contains(&"GMT_Create_Session(gmt-rust-session, 2, 2)".to_string()));
    lib.end().unwrap();
}

#[test]
fn test_session_unusable_after_end() {
    let (mut lib, state) = fake_lib();
    lib.begin().unwrap();
    let session = lib.current_session().unwrap();
    lib.end().unwrap();

    assert!(matches!(lib.current_session(), Err(GmtError::NoSession)));
    assert!(state.live_sessions.borrow().is_empty());
    assert_eq!(
        state.calls.borrow().last().unwrap(),
        &format!("GMT_Destroy_Session({:p})", session.as_ptr())
    );
}

#[test]
fn test_begin_twice_is_rejected() {
    let (mut lib, state) = fake_lib();
    lib.begin().unwrap();
    let err = lib.begin().unwrap_err();
    assert_eq!(clib_message(err), "A GMT session is already open.");
    assert_eq!(state.sessions_created.get(), 1);
    lib.end().unwrap();
}

#[test]
fn test_end_without_session() {
    let (mut lib, state) = fake_lib();
    assert!(matches!(lib.end(), Err(GmtError::NoSession)));
    assert_eq!(state.calls_to("GMT_Destroy_Session"), 0);
}

#[test]
fn test_failed_destroy_still_forgets_session() {
    let (mut lib, state) = fake_lib();
    lib.begin().unwrap();
    state.destroy_status.set(1);

    let err = lib.end().unwrap_err();
    assert_eq!(clib_message(err), "Failed to destroy GMT API session");
    assert!(!lib.is_open());
    assert!(matches!(lib.current_session(), Err(GmtError::NoSession)));
}

#[test]
fn test_null_session_pointer_is_an_error() {
    let (mut lib, state) = fake_lib();
    state.fail_create_session.set(true);

    let err = lib.begin().unwrap_err();
    assert_eq!(clib_message(err), "Failed to create a GMT API void pointer.");
    assert!(!lib.is_open());
}

#[test]
fn test_scope_destroys_session_on_drop() {
    let (mut lib, state) = fake_lib();
    {
        let scope = lib.scope().unwrap();
        assert!(scope.is_open());
        scope.call_module("psbasemap", "-R0/1/0/1 -JX5c -B1").unwrap();
    }
    assert!(!lib.is_open());
    assert!(state.live_sessions.borrow().is_empty());
    assert_eq!(state.calls_to("GMT_Destroy_Session"), 1);
}

#[test]
fn test_scope_destroys_session_on_error_path() {
    fn plot(lib: &mut LibGmt<FakeApi>) -> crate::error::Result<()> {
        let scope = lib.scope()?;
        scope.call_module("not_a_module", "")?;
        scope.finish()
    }

    let (mut lib, state) = fake_lib();
    state.module_status.set(1);

    let err = plot(&mut lib).unwrap_err();
    assert_eq!(clib_message(err), "Invalid GMT module name 'not_a_module'.");
    assert!(!lib.is_open());
    assert!(state.live_sessions.borrow().is_empty());
}

#[test]
fn test_scope_finish_reports_destroy_failure() {
    let (mut lib, state) = fake_lib();
    let scope = lib.scope().unwrap();
    state.destroy_status.set(-1);

    let err = scope.finish().unwrap_err();
    assert_eq!(clib_message(err), "Failed to destroy GMT API session");
    assert!(!lib.is_open());
    assert_eq!(state.calls_to("GMT_Destroy_Session"), 1);
}

#[test]
fn test_dropping_binding_destroys_open_session() {
    let (mut lib, state) = fake_lib();
    lib.begin().unwrap();
    drop(lib);
    assert!(state.live_sessions.borrow().is_empty());
    assert_eq!(state.calls_to("GMT_Destroy_Session"), 1);
}

//==================================================================================
// Constants
//==================================================================================

#[test]
fn test_get_constant_known_and_unknown() {
    let (lib, _state) = fake_lib();
    assert_eq!(lib.get_constant("GMT_SESSION_EXTERNAL").unwrap(), 2);
    assert_eq!(lib.get_constant("GMT_VIA_MATRIX").unwrap(), 200);

    let err = lib.get_constant("A_WHOLE_LOT_OF_JUNK").unwrap_err();
    assert_eq!(
        clib_message(err),
        "Constant 'A_WHOLE_LOT_OF_JUNK' doesn't exist in libgmt."
    );
}

#[test]
fn test_negative_constant_rejected_for_unsigned_parameter() {
    let state = Rc::new(FakeState::default());
    let mut api = FakeApi::new(state.clone());
    api.constants.insert("GMT_SESSION_EXTERNAL", -2);
    let mut lib = LibGmt::with_api(api, unique_config());

    let err = lib.begin().unwrap_err();
    assert_eq!(
        clib_message(err),
        "Constant 'GMT_SESSION_EXTERNAL' has value -2, which can't be passed as unsigned."
    );
    assert!(!lib.is_open());
    assert_eq!(state.calls_to("GMT_Create_Session"), 0);
}

#[test]
fn test_get_constant_does_not_need_a_session() {
    let (lib, _state) = fake_lib();
    assert!(!lib.is_open());
    assert_eq!(lib.get_constant("GMT_MODULE_CMD").unwrap(), 0);
}

#[test]
fn test_constant_name_with_nul_byte() {
    let (lib, state) = fake_lib();
    let err = lib.get_constant("GMT_IS\0GRID").unwrap_err();
    assert!(matches!(err, GmtError::InvalidString(_)));
    assert!(state.calls.borrow().is_empty());
}

//==================================================================================
// Log files
//==================================================================================

#[test]
fn test_log_to_file_requires_session() {
    let (lib, state) = fake_lib();
    assert!(matches!(lib.log_to_file(None), Err(GmtError::NoSession)));
    assert!(leftover_logs(lib.config()).is_empty());
    assert_eq!(state.calls_to("GMT_Handle_Messages"), 0);
}

#[test]
fn test_log_to_file_points_libgmt_at_the_temp_file() {
    let (lib, state) = open_fake_lib();
    let log = lib.log_to_file(None).unwrap();

    assert_eq!(
        state.log_destination.borrow().as_deref(),
        Some(log.path())
    );
    assert_eq!(
        state.calls.borrow().last().unwrap(),
        &format!("GMT_Handle_Messages(1, 0, {})", log.path().display())
    );

    let path = log.path().to_path_buf();
    assert!(path.exists());
    drop(log);
    assert!(!path.exists());
}

#[test]
fn test_log_to_file_with_given_path() {
    let (lib, state) = open_fake_lib();
    let dir = tempfile::tempdir().unwrap();
    let wanted = dir.path().join("my-session.log");

    let log = lib.log_to_file(Some(&wanted)).unwrap();
    assert_eq!(log.path(), wanted.as_path());
    assert_eq!(state.log_destination.borrow().as_deref(), Some(wanted.as_path()));

    std::fs::write(&wanted, "some text").unwrap();
    log.close().unwrap();
    assert!(!wanted.exists());
}

#[test]
fn test_failed_log_setup_removes_file() {
    let (lib, state) = open_fake_lib();
    state.messages_status.set(3);
    let dir = tempfile::tempdir().unwrap();
    let wanted = dir.path().join("rejected.log");
    std::fs::write(&wanted, "").unwrap();

    let err = lib.log_to_file(Some(&wanted)).unwrap_err();
    assert_eq!(
        clib_message(err),
        format!(
            "Failed to set logging to file '{}' (error: 3).",
            wanted.display()
        )
    );
    assert!(!wanted.exists());
}

//==================================================================================
// call_module
//==================================================================================

#[test]
fn test_call_module_success_leaves_no_log_file() {
    let (lib, state) = open_fake_lib();
    *state.module_log.borrow_mut() = Some(b"psbasemap: all good".to_vec());

    lib.call_module("psbasemap", "-R0/5/0/10 -JM10c -Ba").unwrap();

    assert_eq!(
        state.module_calls.borrow().as_slice(),
        &[("psbasemap".to_string(), "-R0/5/0/10 -JM10c -Ba".to_string())]
    );
    let log_path = state.log_destination.borrow().clone().unwrap();
    assert!(!log_path.exists());
    assert!(leftover_logs(lib.config()).is_empty());
}

#[test]
fn test_call_module_order_of_native_calls() {
    let (lib, state) = open_fake_lib();
    lib.call_module("gmtset", "FONT_TITLE 12p").unwrap();

    let calls = state.calls.borrow();
    let position = |prefix: &str| calls.iter().position(|c| c.starts_with(prefix)).unwrap();
    assert_eq!(calls[0], "GMT_Get_Enum(GMT_MODULE_CMD)");
    assert!(position("GMT_Handle_Messages") < position("GMT_Call_Module"));
}

#[test]
fn test_call_module_failure_includes_error_log() {
    let (lib, state) = open_fake_lib();
    state.module_status.set(71);
    *state.module_log.borrow_mut() = Some(
        "\npsbasemap [ERROR]: Must specify -R option\npsbasemap [ERROR]: Must specify -J option\n"
            .as_bytes()
            .to_vec(),
    );

    let err = lib.call_module("psbasemap", "-Ba").unwrap_err();
    let expected = "'psbasemap' failed (error: 71).\n\
                    ---------- Error log ----------\n\
                    \n\
                    psbasemap [ERROR]: Must specify -R option\n\
                    psbasemap [ERROR]: Must specify -J option\n\
                    \n\
                    -------------------------------";
    assert_eq!(clib_message(err), expected);

    let log_path = state.log_destination.borrow().clone().unwrap();
    assert!(!log_path.exists());
}

#[test]
fn test_call_module_tolerates_non_utf8_log() {
    let (lib, state) = open_fake_lib();
    *state.module_log.borrow_mut() = Some(b"grdinfo [WARNING]: caf\xe9.nc has no CRS\n".to_vec());

    lib.call_module("grdinfo", "caf.nc").unwrap();
    assert!(leftover_logs(lib.config()).is_empty());

    state.module_status.set(4);
    let err = lib.call_module("grdinfo", "caf.nc").unwrap_err();
    let msg = clib_message(err);
    assert!(msg.starts_with("'grdinfo' failed (error: 4)."));
    assert!(msg.contains("---------- Error log ----------"));
    assert!(msg.contains("grdinfo [WARNING]: caf\u{FFFD}.nc has no CRS"));
    assert!(leftover_logs(lib.config()).is_empty());
}

#[test]
fn test_call_module_status_outranks_unreadable_log() {
    let (lib, state) = open_fake_lib();
    state.module_status.set(12);
    state.log_becomes_directory.set(true);

    let err = lib.call_module("psxy", "-W1p").unwrap_err();
    assert_eq!(clib_message(err), "Invalid GMT module name 'psxy'.");

    let leftover = state.log_destination.borrow().clone().unwrap();
    assert!(leftover.is_dir());
    std::fs::remove_dir(leftover).unwrap();
}

#[test]
fn test_call_module_failure_without_log_is_invalid_module() {
    let (lib, state) = open_fake_lib();
    state.module_status.set(-1);

    let err = lib.call_module("meh", "").unwrap_err();
    assert_eq!(clib_message(err), "Invalid GMT module name 'meh'.");
    assert!(leftover_logs(lib.config()).is_empty());
}

#[test]
fn test_call_module_without_session_creates_no_log_file() {
    let (lib, state) = fake_lib();
    let err = lib.call_module("psbasemap", "-R0/1/0/1").unwrap_err();
    assert!(matches!(err, GmtError::NoSession));
    assert!(leftover_logs(lib.config()).is_empty());
    assert_eq!(state.calls_to("GMT_Handle_Messages"), 0);
    assert_eq!(state.calls_to("GMT_Call_Module"), 0);
}

#[test]
fn test_call_module_when_log_setup_fails() {
    let (lib, state) = open_fake_lib();
    state.messages_status.set(9);

    let err = lib.call_module("psxy", "-W1p").unwrap_err();
    assert!(clib_message(err).starts_with("Failed to set logging to file"));
    assert_eq!(state.calls_to("GMT_Call_Module"), 0);
    assert!(leftover_logs(lib.config()).is_empty());
}

//==================================================================================
// create_data
//==================================================================================

#[test]
fn test_create_data_defaults() {
    let (lib, state) = open_fake_lib();
    let data = lib
        .create_data(
            FamilySpec::from(DataFamily::Dataset),
            DataGeometry::Point,
            DataMode::ContainerOnly,
            &DataOptions::new().dim([10, 20, 1, 0]),
        )
        .unwrap();
    assert_eq!(data.address(), 0xDA7A0);

    let calls = state.create_data_calls.borrow();
    assert_eq!(
        calls[0],
        CreateDataCall {
            family: 0,
            geometry: 1,
            mode: 1,
            dim: Some(vec![10, 20, 1, 0]),
            range: None,
            inc: None,
            registration: 0,
            pad: 2,
            data_is_null: true,
        }
    );
}

#[test]
fn test_create_data_with_via_and_explicit_options() {
    let (lib, state) = open_fake_lib();
    let options = DataOptions::new()
        .ranges([0.0, 10.0, -5.0, 5.0])
        .inc([0.5, 0.25])
        .registration(1)
        .pad(0);
    lib.create_data(
        FamilySpec::new(DataFamily::Grid, Some(DataVia::Matrix)),
        DataGeometry::Surface,
        DataMode::Output,
        &options,
    )
    .unwrap();

    let call = state.create_data_calls.borrow()[0].clone();
    assert_eq!(call.family, 1 + 200);
    assert_eq!(call.geometry, 8);
    assert_eq!(call.mode, 1024);
    assert_eq!(call.dim, None);
    assert_eq!(call.range, Some(vec![0.0, 10.0, -5.0, 5.0]));
    assert_eq!(call.inc, Some(vec![0.5, 0.25]));
    assert_eq!(call.registration, 1);
    assert_eq!(call.pad, 0);
    // Explicit registration and pad skip the default lookups.
    assert_eq!(state.calls_to("GMT_Get_Enum(GMT_GRID_NODE_REG)"), 0);
    assert_eq!(state.calls_to("GMT_Get_Enum(GMT_PAD_DEFAULT)"), 0);
}

#[test]
fn test_create_data_from_names() {
    let (lib, state) = open_fake_lib();
    lib.create_data_from_names(
        "GMT_IS_DATASET|GMT_VIA_VECTOR",
        "GMT_IS_LINE",
        "GMT_OUTPUT",
        &DataOptions::new(),
    )
    .unwrap();
    let call = state.create_data_calls.borrow()[0].clone();
    assert_eq!(call.family, 100);
    assert_eq!(call.geometry, 2);
}

#[test]
fn test_create_data_rejects_invalid_names_before_native_calls() {
    let (lib, state) = open_fake_lib();
    let options = DataOptions::new();

    let err = lib
        .create_data_from_names("Not_a_valid_family", "GMT_IS_POINT", "GMT_OUTPUT", &options)
        .unwrap_err();
    assert_eq!(clib_message(err), "Invalid data family 'Not_a_valid_family'.");

    let err = lib
        .create_data_from_names("GMT_IS_DATASET|GMT_VIA_BLAH", "GMT_IS_POINT", "GMT_OUTPUT", &options)
        .unwrap_err();
    assert_eq!(clib_message(err), "Invalid data family (via) 'GMT_VIA_BLAH'.");

    let err = lib
        .create_data_from_names("GMT_IS_DATASET", "GMT_IS_POINT", "Not_a_valid_mode", &options)
        .unwrap_err();
    assert_eq!(clib_message(err), "Invalid data creation mode 'Not_a_valid_mode'.");

    let err = lib
        .create_data_from_names("GMT_IS_DATASET", "Not_a_valid_geometry", "GMT_OUTPUT", &options)
        .unwrap_err();
    assert_eq!(clib_message(err), "Invalid data geometry 'Not_a_valid_geometry'.");

    let err = lib
        .create_data_from_names(
            "GMT_IS_DATASET|GMT_VIA_MATRIX|GMT_VIA_VECTOR",
            "GMT_IS_POINT",
            "GMT_OUTPUT",
            &options,
        )
        .unwrap_err();
    assert!(clib_message(err).starts_with("Too many sections in family (>2)"));

    assert!(state.calls.borrow().is_empty());
}

#[test]
fn test_create_data_without_session() {
    let (lib, state) = fake_lib();
    let err = lib
        .create_data(
            DataFamily::Vector.into(),
            DataGeometry::None,
            DataMode::ContainerOnly,
            &DataOptions::new(),
        )
        .unwrap_err();
    assert!(matches!(err, GmtError::NoSession));
    assert!(state.calls.borrow().is_empty());
}

#[test]
fn test_create_data_null_pointer() {
    let (lib, state) = open_fake_lib();
    state.fail_create_data.set(true);
    let err = lib
        .create_data(
            DataFamily::Matrix.into(),
            DataGeometry::Surface,
            DataMode::ContainerOnly,
            &DataOptions::new(),
        )
        .unwrap_err();
    assert_eq!(clib_message(err), "Failed to create an empty GMT data pointer.");
}

#[test]
fn test_leftover_logs_helper_sees_prefixed_files() {
    let config = unique_config();
    let log = LogFile::create(&config).unwrap();
    assert_eq!(leftover_logs(&config), vec![log.path().to_path_buf()]);
    drop(log);
    assert!(leftover_logs(&config).is_empty());
}
