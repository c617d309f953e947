use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartsError {
    // Template errors
    #[error("TEMPLATE_PARSE_ERROR: {0}")]
    TemplateParse(String),

    #[error("TEMPLATE_NOT_FOUND: markup contains no <template> element")]
    TemplateNotFound,

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParse(String),

    // Params errors
    #[error("PARAMS_PARSE_ERROR: {0}")]
    ParamsParse(String),

    #[error("PARAM_UNDEFINED: '{expression}' not found in params")]
    ParamUndefined { expression: String },

    #[error("PARAM_TABLE: '{expression}' resolves to a table, use nested keys like {expression}.field")]
    ParamTable { expression: String },

    // Binding errors
    #[error("PROCESSOR_NOT_FOUND: no processor bound to '{0}'")]
    ProcessorNotFound(String),

    #[error("PROCESSOR_NOT_DECLARED: template declares no processor type")]
    ProcessorNotDeclared,

    // IO errors
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for PartsError {
    fn from(err: toml::de::Error) -> Self {
        PartsError::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PartsError>;
