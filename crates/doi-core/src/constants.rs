//! Constantes del sender.
//!
//! Claves de settings leídas de los colaboradores externos y valores por
//! defecto del nombrado de archivos transitorios. Las claves deben coincidir
//! con las que persiste el repositorio; cambiarlas rompe la lectura de
//! configuraciones existentes.

/// Usuario de la cuenta del registrador (setting del tenant).
pub const SETTING_USERNAME: &str = "username";
/// Credencial de la cuenta del registrador (setting del tenant).
pub const SETTING_PASSWORD: &str = "password";
/// Flag de registro automático (setting del tenant).
pub const SETTING_AUTOMATIC_REGISTRATION: &str = "automaticRegistration";

/// Nombre del sub-plugin de identificadores.
pub const IDENTIFIER_PLUGIN_NAME: &str = "doipubidplugin";
/// Flag de habilitación del sub-plugin (setting del sub-plugin).
pub const SETTING_PLUGIN_ENABLED: &str = "enabled";
/// Prefijo DOI configurado en el sub-plugin.
pub const SETTING_DOI_PREFIX: &str = "doiPrefix";

pub const SETTING_ENABLE_ISSUE_DOI: &str = "enableIssueDoi";
pub const SETTING_ENABLE_PUBLICATION_DOI: &str = "enablePublicationDoi";
pub const SETTING_ENABLE_REPRESENTATION_DOI: &str = "enableRepresentationDoi";

/// Prefijo por defecto de los archivos de export.
pub const DEFAULT_EXPORT_FILE_PREFIX: &str = "datacite";
/// Extensión por defecto de los archivos de export.
pub const DEFAULT_EXPORT_FILE_EXTENSION: &str = ".xml";
