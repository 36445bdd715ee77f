//! Label tables for the four supported interface languages.
//!
//! Templates use `{name}` style placeholders filled by [`tf`].

use crate::card::{CardPriority, CardStatus};
use crate::preferences::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    AppTitle,
    Dashboard,
    Calendar,
    Search,
    Status,
    InProgress,
    Done,
    Waiting,
    Rejected,
    Priority,
    High,
    Medium,
    Low,
    NoPriority,
    NewColumn,
    EditColumn,
    NewCard,
    EditCard,
    Save,
    Cancel,
    Close,
    Yes,
    No,
    ColumnName,
    ColumnColor,
    CardTitle,
    CardColumn,
    CardDescription,
    CardDue,
    CardLink,
    CardTags,
    Checklist,
    NewTask,
    Notes,
    Import,
    Export,
    FilePath,
    Total,
    Pending,
    Sent,
    Overdue,
    Completion,
    NoDueDates,
    EmptyBoard,
    ColumnAdded,
    ColumnUpdated,
    ColumnRemoved,
    ColumnReordered,
    CardAdded,
    CardUpdated,
    CardRemoved,
    CardMoved,
    CardDuplicated,
    ChecklistUpdated,
    Exported,
    Imported,
    ImportInvalid,
    SaveFailed,
    NotFound,
    InvalidInput,
    TooManyColumns,
    ConfirmRemoveColumnTitle,
    ConfirmRemoveColumn,
    ConfirmRemoveColumnWithCards,
    ConfirmRemoveCardTitle,
    ConfirmRemoveCard,
    CopySuffix,
    DueTomorrow,
    DueInAWeek,
    OverdueAlert,
    NotificationPrompt,
    ThemeChanged,
    LanguageChanged,
    LinkCopied,
    BoardReloaded,
}

pub fn t(lang: Language, label: Label) -> &'static str {
    match lang {
        Language::Pt => pt(label),
        Language::En => en(label),
        Language::Es => es(label),
        Language::Zh => zh(label),
    }
}

/// Looks up a template and substitutes `{key}` placeholders.
pub fn tf(lang: Language, label: Label, args: &[(&str, &str)]) -> String {
    fill(t(lang, label), args)
}

pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{}}}", key), value)
    })
}

pub fn status_label(lang: Language, status: CardStatus) -> &'static str {
    t(
        lang,
        match status {
            CardStatus::InProgress => Label::InProgress,
            CardStatus::Done => Label::Done,
            CardStatus::Waiting => Label::Waiting,
            CardStatus::Rejected => Label::Rejected,
        },
    )
}

pub fn priority_label(lang: Language, priority: Option<CardPriority>) -> &'static str {
    t(
        lang,
        match priority {
            Some(CardPriority::High) => Label::High,
            Some(CardPriority::Medium) => Label::Medium,
            Some(CardPriority::Low) => Label::Low,
            None => Label::NoPriority,
        },
    )
}

fn pt(label: Label) -> &'static str {
    use Label::*;
    match label {
        AppTitle => "Gerenciador de Airdrops",
        Dashboard => "Dashboard",
        Calendar => "Calendário",
        Search => "Buscar...",
        Status => "Status",
        InProgress => "Em andamento",
        Done => "Concluído",
        Waiting => "Aguardando",
        Rejected => "Rejeitado",
        Priority => "Prioridade",
        High => "Alta",
        Medium => "Média",
        Low => "Baixa",
        NoPriority => "Sem prioridade",
        NewColumn => "Nova Coluna",
        EditColumn => "Editar Coluna",
        NewCard => "Novo Cartão",
        EditCard => "Editar Cartão",
        Save => "Salvar",
        Cancel => "Cancelar",
        Close => "Fechar",
        Yes => "Sim",
        No => "Não",
        ColumnName => "Nome da Coluna",
        ColumnColor => "Cor da Coluna",
        CardTitle => "Título",
        CardColumn => "Coluna",
        CardDescription => "Descrição",
        CardDue => "Prazo",
        CardLink => "Link do Projeto",
        CardTags => "Tags (separadas por vírgula)",
        Checklist => "Checklist",
        NewTask => "Nova tarefa...",
        Notes => "Observações",
        Import => "Importar",
        Export => "Exportar",
        FilePath => "Caminho do arquivo",
        Total => "Total",
        Pending => "Pendentes",
        Sent => "Enviadas",
        Overdue => "Atrasados",
        Completion => "Conclusão",
        NoDueDates => "Nenhum cartão com prazo",
        EmptyBoard => "Nenhuma coluna. Pressione 'C' para criar uma.",
        ColumnAdded => "Coluna \"{name}\" adicionada!",
        ColumnUpdated => "Coluna atualizada!",
        ColumnRemoved => "Coluna removida!",
        ColumnReordered => "Coluna reordenada!",
        CardAdded => "Cartão adicionado com sucesso!",
        CardUpdated => "Cartão atualizado com sucesso!",
        CardRemoved => "Cartão removido!",
        CardMoved => "Cartão movido com sucesso!",
        CardDuplicated => "Cartão duplicado com sucesso!",
        ChecklistUpdated => "Checklist atualizado!",
        Exported => "Kanban exportado com sucesso!",
        Imported => "Kanban importado com sucesso!",
        ImportInvalid => "Arquivo de importação inválido!",
        SaveFailed => "Erro ao salvar dados",
        NotFound => "Item não encontrado",
        InvalidInput => "Dados inválidos: {detail}",
        TooManyColumns => "Limite de {max} colunas atingido",
        ConfirmRemoveColumnTitle => "Remover coluna?",
        ConfirmRemoveColumn => "Deseja remover a coluna \"{name}\"?",
        ConfirmRemoveColumnWithCards => "A coluna \"{name}\" contém {count} cartões que também serão removidos. Deseja continuar?",
        ConfirmRemoveCardTitle => "Remover cartão?",
        ConfirmRemoveCard => "Deseja remover o cartão \"{title}\"?",
        CopySuffix => " (Cópia)",
        DueTomorrow => "Prazo amanhã: {title}",
        DueInAWeek => "Prazo em uma semana: {title}",
        OverdueAlert => "Atrasado: {title}",
        NotificationPrompt => "Permitir alertas sonoros para lembretes e prazos?",
        ThemeChanged => "Tema: {theme}",
        LanguageChanged => "Idioma alterado",
        LinkCopied => "Link copiado!",
        BoardReloaded => "Quadro recarregado",
    }
}

fn en(label: Label) -> &'static str {
    use Label::*;
    match label {
        AppTitle => "Airdrops Manager",
        Dashboard => "Dashboard",
        Calendar => "Calendar",
        Search => "Search...",
        Status => "Status",
        InProgress => "In progress",
        Done => "Done",
        Waiting => "Waiting",
        Rejected => "Rejected",
        Priority => "Priority",
        High => "High",
        Medium => "Medium",
        Low => "Low",
        NoPriority => "No priority",
        NewColumn => "New Column",
        EditColumn => "Edit Column",
        NewCard => "New Card",
        EditCard => "Edit Card",
        Save => "Save",
        Cancel => "Cancel",
        Close => "Close",
        Yes => "Yes",
        No => "No",
        ColumnName => "Column Name",
        ColumnColor => "Column Color",
        CardTitle => "Title",
        CardColumn => "Column",
        CardDescription => "Description",
        CardDue => "Due Date",
        CardLink => "Project Link",
        CardTags => "Tags (comma separated)",
        Checklist => "Checklist",
        NewTask => "New task...",
        Notes => "Notes",
        Import => "Import",
        Export => "Export",
        FilePath => "File path",
        Total => "Total",
        Pending => "Pending",
        Sent => "Sent",
        Overdue => "Overdue",
        Completion => "Completion",
        NoDueDates => "No cards with a due date",
        EmptyBoard => "No columns yet. Press 'C' to create one.",
        ColumnAdded => "Column \"{name}\" added!",
        ColumnUpdated => "Column updated!",
        ColumnRemoved => "Column removed!",
        ColumnReordered => "Column reordered!",
        CardAdded => "Card added!",
        CardUpdated => "Card updated!",
        CardRemoved => "Card removed!",
        CardMoved => "Card moved!",
        CardDuplicated => "Card duplicated!",
        ChecklistUpdated => "Checklist updated!",
        Exported => "Board exported!",
        Imported => "Board imported!",
        ImportInvalid => "Invalid import file!",
        SaveFailed => "Could not save data",
        NotFound => "Item not found",
        InvalidInput => "Invalid input: {detail}",
        TooManyColumns => "Limit of {max} columns reached",
        ConfirmRemoveColumnTitle => "Remove column?",
        ConfirmRemoveColumn => "Remove the column \"{name}\"?",
        ConfirmRemoveColumnWithCards => "The column \"{name}\" holds {count} cards that will also be removed. Continue?",
        ConfirmRemoveCardTitle => "Remove card?",
        ConfirmRemoveCard => "Remove the card \"{title}\"?",
        CopySuffix => " (Copy)",
        DueTomorrow => "Due tomorrow: {title}",
        DueInAWeek => "Due in one week: {title}",
        OverdueAlert => "Overdue: {title}",
        NotificationPrompt => "Allow audible alerts for reminders and deadlines?",
        ThemeChanged => "Theme: {theme}",
        LanguageChanged => "Language changed",
        LinkCopied => "Link copied!",
        BoardReloaded => "Board reloaded",
    }
}

fn es(label: Label) -> &'static str {
    use Label::*;
    match label {
        AppTitle => "Gestor de Airdrops",
        Dashboard => "Panel",
        Calendar => "Calendario",
        Search => "Buscar...",
        Status => "Estado",
        InProgress => "En progreso",
        Done => "Completado",
        Waiting => "Esperando",
        Rejected => "Rechazado",
        Priority => "Prioridad",
        High => "Alta",
        Medium => "Media",
        Low => "Baja",
        NoPriority => "Sin prioridad",
        NewColumn => "Nueva Columna",
        EditColumn => "Editar Columna",
        NewCard => "Nueva Tarjeta",
        EditCard => "Editar Tarjeta",
        Save => "Guardar",
        Cancel => "Cancelar",
        Close => "Cerrar",
        Yes => "Sí",
        No => "No",
        ColumnName => "Nombre de la Columna",
        ColumnColor => "Color de la Columna",
        CardTitle => "Título",
        CardColumn => "Columna",
        CardDescription => "Descripción",
        CardDue => "Fecha Límite",
        CardLink => "Enlace del Proyecto",
        CardTags => "Etiquetas (separadas por coma)",
        Checklist => "Checklist",
        NewTask => "Nueva tarea...",
        Notes => "Notas",
        Import => "Importar",
        Export => "Exportar",
        FilePath => "Ruta del archivo",
        Total => "Total",
        Pending => "Pendientes",
        Sent => "Enviadas",
        Overdue => "Atrasadas",
        Completion => "Progreso",
        NoDueDates => "Ninguna tarjeta con fecha límite",
        EmptyBoard => "Sin columnas. Pulsa 'C' para crear una.",
        ColumnAdded => "¡Columna \"{name}\" añadida!",
        ColumnUpdated => "¡Columna actualizada!",
        ColumnRemoved => "¡Columna eliminada!",
        ColumnReordered => "¡Columna reordenada!",
        CardAdded => "¡Tarjeta añadida!",
        CardUpdated => "¡Tarjeta actualizada!",
        CardRemoved => "¡Tarjeta eliminada!",
        CardMoved => "¡Tarjeta movida!",
        CardDuplicated => "¡Tarjeta duplicada!",
        ChecklistUpdated => "¡Checklist actualizado!",
        Exported => "¡Tablero exportado!",
        Imported => "¡Tablero importado!",
        ImportInvalid => "¡Archivo de importación inválido!",
        SaveFailed => "Error al guardar los datos",
        NotFound => "Elemento no encontrado",
        InvalidInput => "Datos inválidos: {detail}",
        TooManyColumns => "Límite de {max} columnas alcanzado",
        ConfirmRemoveColumnTitle => "¿Eliminar columna?",
        ConfirmRemoveColumn => "¿Eliminar la columna \"{name}\"?",
        ConfirmRemoveColumnWithCards => "La columna \"{name}\" contiene {count} tarjetas que también se eliminarán. ¿Continuar?",
        ConfirmRemoveCardTitle => "¿Eliminar tarjeta?",
        ConfirmRemoveCard => "¿Eliminar la tarjeta \"{title}\"?",
        CopySuffix => " (Copia)",
        DueTomorrow => "Vence mañana: {title}",
        DueInAWeek => "Vence en una semana: {title}",
        OverdueAlert => "Atrasada: {title}",
        NotificationPrompt => "¿Permitir alertas sonoras para recordatorios y plazos?",
        ThemeChanged => "Tema: {theme}",
        LanguageChanged => "Idioma cambiado",
        LinkCopied => "¡Enlace copiado!",
        BoardReloaded => "Tablero recargado",
    }
}

fn zh(label: Label) -> &'static str {
    use Label::*;
    match label {
        AppTitle => "空投看板",
        Dashboard => "仪表盘",
        Calendar => "日历",
        Search => "搜索...",
        Status => "状态",
        InProgress => "进行中",
        Done => "已完成",
        Waiting => "等待中",
        Rejected => "已拒绝",
        Priority => "优先级",
        High => "高",
        Medium => "中",
        Low => "低",
        NoPriority => "无优先级",
        NewColumn => "新列",
        EditColumn => "编辑列",
        NewCard => "新卡片",
        EditCard => "编辑卡片",
        Save => "保存",
        Cancel => "取消",
        Close => "关闭",
        Yes => "是",
        No => "否",
        ColumnName => "列名",
        ColumnColor => "列颜色",
        CardTitle => "标题",
        CardColumn => "列",
        CardDescription => "描述",
        CardDue => "截止日期",
        CardLink => "项目链接",
        CardTags => "标签（逗号分隔）",
        Checklist => "清单",
        NewTask => "新任务...",
        Notes => "备注",
        Import => "导入",
        Export => "导出",
        FilePath => "文件路径",
        Total => "总计",
        Pending => "待发送",
        Sent => "已发送",
        Overdue => "已逾期",
        Completion => "完成度",
        NoDueDates => "没有设置截止日期的卡片",
        EmptyBoard => "还没有列。按 'C' 创建一列。",
        ColumnAdded => "已添加列“{name}”！",
        ColumnUpdated => "列已更新！",
        ColumnRemoved => "列已删除！",
        ColumnReordered => "列已重新排序！",
        CardAdded => "卡片已添加！",
        CardUpdated => "卡片已更新！",
        CardRemoved => "卡片已删除！",
        CardMoved => "卡片已移动！",
        CardDuplicated => "卡片已复制！",
        ChecklistUpdated => "清单已更新！",
        Exported => "看板已导出！",
        Imported => "看板已导入！",
        ImportInvalid => "导入文件无效！",
        SaveFailed => "保存数据失败",
        NotFound => "未找到该项目",
        InvalidInput => "输入无效：{detail}",
        TooManyColumns => "已达到 {max} 列的上限",
        ConfirmRemoveColumnTitle => "删除列？",
        ConfirmRemoveColumn => "确定删除列“{name}”吗？",
        ConfirmRemoveColumnWithCards => "列“{name}”包含 {count} 张卡片，它们也将被删除。是否继续？",
        ConfirmRemoveCardTitle => "删除卡片？",
        ConfirmRemoveCard => "确定删除卡片“{title}”吗？",
        CopySuffix => "（副本）",
        DueTomorrow => "明天到期：{title}",
        DueInAWeek => "一周后到期：{title}",
        OverdueAlert => "已逾期：{title}",
        NotificationPrompt => "允许为提醒和截止日期发出提示音吗？",
        ThemeChanged => "主题：{theme}",
        LanguageChanged => "语言已更改",
        LinkCopied => "链接已复制！",
        BoardReloaded => "看板已重新加载",
    }
}
