use thiserror::Error;

/// Erros possíveis durante o parsing de extratos bancários
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// Falha genérica durante o parsing do conteúdo (detalhe na mensagem)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// Formato do arquivo não é suportado pela biblioteca
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    // ── Erros específicos do formato PNC ────────────────────────────────────────

    /// Data de transação fora do formato MM/DD impresso no extrato
    #[error("Invalid statement date format")]
    PncDateInvalidFormat,

    /// Erro ao escrever o CSV de exportação
    #[error("Failed to write CSV output: {0}")]
    CsvWriteFailed(#[from] csv::Error),

    // Exemplos de erros que você pode adicionar no futuro:
    // #[error("Unknown statement template: {0}")]
    // UnknownTemplate(String),
    //
    // #[error("Invalid encoding detected")]
    // InvalidEncoding,
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type StatementResult<T> = Result<T, StatementParseError>;
