use std::collections::HashMap;

use crate::ports::Localization;

const PT_BR: &[(&str, &str)] = &[
    ("Order canceled.", "Pedido cancelado."),
    ("New order status: %s", "Novo status do pedido: %s"),
    ("Order payment failed", "Pagamento do pedido falhou"),
    ("The order will be canceled", "O pedido será cancelado"),
    ("Webhook received: %s %s", "Webhook recebido: %s %s"),
];

/// Dashboard strings keyed by their English text. Unknown texts pass
/// through untranslated.
#[derive(Debug, Clone, Default)]
pub struct DashboardLocalization {
    translations: HashMap<&'static str, &'static str>,
}

impl DashboardLocalization {
    pub fn english() -> Self {
        Self::default()
    }

    pub fn brazilian_portuguese() -> Self {
        Self {
            translations: PT_BR.iter().copied().collect(),
        }
    }

    pub fn for_locale(locale: &str) -> Option<Self> {
        match locale {
            "en_US" => Some(Self::english()),
            "pt_BR" => Some(Self::brazilian_portuguese()),
            _ => None,
        }
    }
}

impl Localization for DashboardLocalization {
    fn get_dashboard(&self, text: &str, args: &[&str]) -> String {
        let template = self.translations.get(text).copied().unwrap_or(text);

        let mut args = args.iter();
        let mut pieces = template.split("%s");
        let mut rendered = pieces.next().unwrap_or_default().to_string();
        for piece in pieces {
            rendered.push_str(args.next().copied().unwrap_or_default());
            rendered.push_str(piece);
        }
        rendered
    }
}
