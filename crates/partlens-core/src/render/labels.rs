//! User-facing strings per locale.

use crate::config::Locale;

/// Label table for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub no_piece: &'static str,
    pub detected_piece: &'static str,
    pub code: &'static str,
    pub description: &'static str,
    pub confidence: &'static str,
    pub inventory: &'static str,
    pub in_stock: &'static str,
    pub out_of_stock: &'static str,
    pub preprocess_failed: &'static str,
    pub upload_failed: &'static str,
}

const EN: Labels = Labels {
    no_piece: "No piece detected",
    detected_piece: "Detected piece",
    code: "Code:",
    description: "Description:",
    confidence: "Detection confidence:",
    inventory: "Quantity in inventory:",
    in_stock: "In stock",
    out_of_stock: "Out of stock",
    preprocess_failed: "Error processing the image before upload.",
    upload_failed: "Error processing image",
};

const PT_BR: Labels = Labels {
    no_piece: "Nenhuma peça detectada",
    detected_piece: "Peça detectada",
    code: "Código:",
    description: "Descrição:",
    confidence: "Confiança da Detecção:",
    inventory: "Quantidade no inventário:",
    in_stock: "Em estoque",
    out_of_stock: "Sem estoque",
    preprocess_failed: "Erro ao processar a imagem antes do envio.",
    upload_failed: "Erro ao processar imagem",
};

impl Labels {
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::En => &EN,
            Locale::PtBr => &PT_BR,
        }
    }
}
